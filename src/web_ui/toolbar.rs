use log::debug;
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::components::select::escape_string;
use crate::error::HarnessResult;

pub fn button_xpath(root: &str) -> String {
    format!("//div[@id='toolbar']//button[normalize-space(.)={}]", escape_string(root))
}

pub fn item_xpath(item: &str) -> String {
    format!(
        "//div[@id='toolbar']//ul[contains(@class, 'dropdown-menu')]//a[normalize-space(.)={}]",
        escape_string(item)
    )
}

pub const RELOAD_XPATH: &str = "//div[@id='toolbar']//button[@title='Reload current display']";

/// Open toolbar menu `root` and click `item`. Items that raise a confirm
/// dialog leave it open for [`handle_alert`](crate::web_ui::alert::handle_alert).
pub fn select(app: &Appliance<'_>, root: &str, item: &str) -> HarnessResult<()> {
    debug!("Toolbar: {} -> {}", root, item);
    app.click(By::XPath(&button_xpath(root)))?;
    app.click(By::XPath(&item_xpath(item)))
}

/// Click the toolbar's reload button.
pub fn refresh(app: &Appliance<'_>) -> HarnessResult<()> {
    app.click(By::XPath(RELOAD_XPATH))
}
