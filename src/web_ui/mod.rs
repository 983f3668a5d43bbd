//! Locators and helpers for the appliance's common page widgets.

pub mod accordion;
pub mod alert;
pub mod flash;
pub mod infoblock;
pub mod quadicon;
pub mod toolbar;

use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::escape_string;
use crate::error::{HarnessError, HarnessResult};

pub use infoblock::InfoBlock;
pub use quadicon::{Quadicon, QuadiconKind};

/// Heading of the current summary page.
pub const SUMMARY_TITLE_XPATH: &str = r#"//div[@id="center_div" or @id="main-content"]//h1"#;

/// Text of the summary page heading, or `None` when the page has none.
pub fn summary_title(app: &Appliance<'_>) -> HarnessResult<Option<String>> {
    match app.find(By::XPath(SUMMARY_TITLE_XPATH)) {
        Ok(elem) => Ok(Some(elem.text()?.trim().to_string())),
        Err(HarnessError::ElementNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn text_xpath(text: &str) -> String {
    format!("//*[contains(normalize-space(text()), {})]", escape_string(text))
}

/// Whether some displayed element contains `text`.
pub fn is_displayed_text(app: &Appliance<'_>, text: &str) -> HarnessResult<bool> {
    app.is_displayed(By::XPath(&text_xpath(text)))
}

/// CSS attribute selector matching the element with id `id`. Ids from
/// configuration may contain anything, so `\` and `"` are escaped.
pub fn css_id(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for c in id.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("[id=\"{}\"]", escaped)
}
