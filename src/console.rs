//! The HTML5 (noVNC) console opened from a VM's Access menu.
//!
//! The console lives in its own browser window. Every operation here
//! switches to that window, does its work and switches back to the
//! appliance window, including when the work fails.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::info;
use thirtyfour::common::types::WindowHandle;
use thirtyfour::By;

use crate::appliance::Appliance;
use crate::error::{HarnessError, HarnessResult};
use crate::query::waiter::Wait;
use crate::web_ui::css_id;

/// Prefix of the data URL returned by `canvas.toDataURL('image/png')`.
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Returns the PNG encoded contents of the canvas passed as the first argument.
const CANVAS_TO_PNG: &str = "return arguments[0].toDataURL('image/png');";

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Decode a `data:image/png;base64,...` URL into PNG bytes.
pub fn decode_png_data_url(url: &str) -> HarnessResult<Vec<u8>> {
    let payload = url.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
        let head: String = url.chars().take(32).collect();
        HarnessError::Decode(format!("not a PNG data URL: {:?}", head))
    })?;
    let bytes = base64::decode(payload)
        .map_err(|e| HarnessError::Decode(format!("invalid base64 payload: {}", e)))?;
    if !is_png(&bytes) {
        return Err(HarnessError::Decode(String::from("payload is not a PNG image")));
    }
    Ok(bytes)
}

/// Whether banner text reports a live connection. Only the start of the
/// text is matched: `"Connected (encrypted) to: vm1"` is connected.
pub fn banner_is_connected(banner: &str) -> bool {
    banner.starts_with("Connected")
}

/// The two windows involved in a console session.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    pub appliance_handle: WindowHandle,
    pub console_handle: WindowHandle,
    /// Name of the VM or instance the console belongs to.
    pub name: String,
}

/// Controller for an open VM console window.
#[derive(Debug, Clone)]
pub struct VmConsole {
    session: ConsoleSession,
}

impl VmConsole {
    pub fn new(session: ConsoleSession) -> Self {
        VmConsole {
            session,
        }
    }

    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    pub fn name(&self) -> &str {
        &self.session.name
    }

    pub fn switch_to_appliance(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        info!("Switching to appliance: window handle = {}", self.session.appliance_handle);
        app.browser().switch_to_window(&self.session.appliance_handle)
    }

    pub fn switch_to_console(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        info!("Switching to console: window handle = {}", self.session.console_handle);
        app.browser().switch_to_window(&self.session.console_handle)
    }

    /// Run `f` with the console window focused, then refocus the appliance.
    /// An error from `f` takes precedence over one from switching back.
    fn in_console<T, F>(&self, app: &Appliance<'_>, f: F) -> HarnessResult<T>
    where
        F: FnOnce() -> HarnessResult<T>,
    {
        self.switch_to_console(app)?;
        let result = f();
        let restored = self.switch_to_appliance(app);
        let value = result?;
        restored?;
        Ok(value)
    }

    /// Text of the status banner above the console screen.
    pub fn banner(&self, app: &Appliance<'_>) -> HarnessResult<String> {
        let banner = css_id(&app.config().console.banner_id);
        let text = self.in_console(app, || app.find(By::Css(&banner))?.text())?;
        info!("Read following text from console banner: {}", text);
        Ok(text)
    }

    /// The console screen as PNG bytes, read from the canvas widget.
    pub fn screen(&self, app: &Appliance<'_>) -> HarnessResult<Vec<u8>> {
        let canvas = css_id(&app.config().console.canvas_id);
        let url = self.in_console(app, || app.find(By::Css(&canvas))?.execute_script(CANVAS_TO_PNG))?;
        match url.as_str() {
            Some(url) => decode_png_data_url(url),
            None => Err(HarnessError::Decode(format!("canvas returned a non-string value: {}", url))),
        }
    }

    /// Capture the console screen and write it to `path`.
    pub fn save_screen(&self, app: &Appliance<'_>, path: &Path) -> HarnessResult<()> {
        let png = self.screen(app)?;
        fs::write(path, png)?;
        Ok(())
    }

    pub fn is_connected(&self, app: &Appliance<'_>) -> HarnessResult<bool> {
        Ok(banner_is_connected(&self.banner(app)?))
    }

    /// Type `text` into the console.
    pub fn send_keys(&self, app: &Appliance<'_>, text: &str) -> HarnessResult<()> {
        let canvas = css_id(&app.config().console.canvas_id);
        self.in_console(app, || app.find(By::Css(&canvas))?.send_keys(text))
    }

    /// Press the console's ctrl-alt-delete button.
    pub fn send_ctrl_alt_delete(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        let button = css_id(&app.config().console.ctrl_alt_del_id);
        self.in_console(app, || app.click(By::Css(&button)))
    }

    /// Wait for the banner to report a connection, using the configured timeout.
    pub fn wait_for_connect(&self, app: &Appliance<'_>) -> HarnessResult<()> {
        self.wait_for_connect_within(app, app.config().console.connect_timeout())
    }

    pub fn wait_for_connect_within(&self, app: &Appliance<'_>, timeout: Duration) -> HarnessResult<()> {
        let interval = app.config().console.poll_interval();
        Wait::new(app.clock(), timeout)
            .interval(interval)
            .message(&format!("console {} to connect", self.session.name))
            .until(|| self.is_connected(app))
    }
}
