use log::debug;
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::escape_string;
use crate::error::{HarnessError, HarnessResult};

pub fn section_xpath(section: &str) -> String {
    format!(
        "//div[contains(@class, 'panel-heading')]//a[normalize-space(.)={}]",
        escape_string(section)
    )
}

pub fn link_xpath(link: &str, partial: bool) -> String {
    let predicate = if partial {
        format!("contains(normalize-space(.), {})", escape_string(link))
    } else {
        format!("normalize-space(.)={}", escape_string(link))
    };
    format!("//div[contains(@class, 'panel-collapse')]//a[{}]", predicate)
}

fn as_candidate(what: String) -> impl FnOnce(HarnessError) -> HarnessError {
    move |e| match e {
        HarnessError::ElementNotFound(_) => HarnessError::CandidateNotFound(what),
        e => e,
    }
}

/// Expand accordion `section` and click `link`. A missing section or link
/// is [`HarnessError::CandidateNotFound`].
pub fn select(app: &Appliance<'_>, section: &str, link: &str, partial: bool) -> HarnessResult<()> {
    debug!("Accordion: {} -> {} (partial: {})", section, link, partial);
    app.click(By::XPath(&section_xpath(section)))
        .map_err(as_candidate(format!("accordion section {:?}", section)))?;
    app.click(By::XPath(&link_xpath(link, partial)))
        .map_err(as_candidate(format!("accordion link {:?} in {:?}", link, section)))
}
