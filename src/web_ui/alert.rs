use log::info;

use crate::appliance::Appliance;
use crate::error::{HarnessError, HarnessResult};

/// Wait for a JavaScript confirm dialog and dismiss it (`cancel`) or
/// accept it. Returns the dialog text.
pub fn handle_alert(app: &Appliance<'_>, cancel: bool) -> HarnessResult<String> {
    let browser = app.browser();
    let timeout = app.config().waits.alert();
    let text = app
        .wait(timeout)
        .message("alert to appear")
        .until_some(|| match browser.alert_text() {
            Ok(text) => Ok(Some(text)),
            Err(HarnessError::NoSuchAlert(_)) => Ok(None),
            Err(e) => Err(e),
        })
        .map_err(|e| match e {
            HarnessError::Timeout {
                elapsed, ..
            } => HarnessError::NoSuchAlert(format!("no alert appeared within {:?}", elapsed)),
            e => e,
        })?;

    if cancel {
        info!("Dismissing alert: {}", text);
        browser.dismiss_alert()?;
    } else {
        info!("Accepting alert: {}", text);
        browser.accept_alert()?;
    }
    Ok(text)
}
