use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::escape_string;
use crate::error::HarnessResult;
use crate::webelement::WebElement;

/// A key in one of the labelled key/value panels on a summary page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock {
    pub title: String,
    pub key: String,
}

impl InfoBlock {
    pub fn new(title: &str, key: &str) -> Self {
        InfoBlock {
            title: title.to_string(),
            key: key.to_string(),
        }
    }

    fn table_xpath(&self) -> String {
        format!("//table[./thead/tr/th[normalize-space(.)={}]]", escape_string(&self.title))
    }

    /// The value cell.
    pub fn xpath(&self) -> String {
        format!(
            "{}/tbody/tr[./td[1][normalize-space(.)={}]]/td[2]",
            self.table_xpath(),
            escape_string(&self.key)
        )
    }

    /// The whole clickable row, as rendered by older appliances.
    pub fn row_xpath(&self) -> String {
        format!(
            "{}/tbody/tr[@onclick][./td[normalize-space(.)={}]]",
            self.table_xpath(),
            escape_string(&self.key)
        )
    }

    pub fn element<'a>(&self, app: &Appliance<'a>) -> HarnessResult<WebElement<'a>> {
        app.find(By::XPath(&self.xpath()))
    }

    pub fn text(&self, app: &Appliance<'_>) -> HarnessResult<String> {
        Ok(self.element(app)?.text()?.trim().to_string())
    }

    /// Click the value cell, falling back to the legacy row.
    pub fn click(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        match app.click(By::XPath(&self.xpath())) {
            Err(e) if e.is_not_found() => app.click(By::XPath(&self.row_xpath())),
            other => other,
        }
    }
}
