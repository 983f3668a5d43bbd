use stringmatch::{Needle, StringMatch};
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::error::{HarnessError, HarnessResult};

pub const MESSAGES_XPATH: &str = "//div[@id='flash_msg_div']//li";

/// Text of every flash message currently shown.
pub fn messages(app: &Appliance<'_>) -> HarnessResult<Vec<String>> {
    let mut texts = Vec::new();
    for message in app.find_all(By::XPath(MESSAGES_XPATH))? {
        texts.push(message.text()?.trim().to_string());
    }
    Ok(texts)
}

/// Fail unless some flash message matches `needle`.
pub fn assert_message<N>(app: &Appliance<'_>, needle: N, expected: &str) -> HarnessResult<()>
where
    N: Needle,
{
    let found = messages(app)?;
    if found.iter().any(|m| needle.is_match(m)) {
        Ok(())
    } else {
        Err(HarnessError::FlashMessageMissing {
            expected: expected.to_string(),
            found,
        })
    }
}

/// Fail unless some flash message contains `text`.
pub fn assert_message_contain(app: &Appliance<'_>, text: &str) -> HarnessResult<()> {
    assert_message(app, StringMatch::new(text).partial(), text)
}
