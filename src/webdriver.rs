use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use thirtyfour::common::capabilities::chrome::ChromeCapabilities;
use thirtyfour::common::command::Command;
use thirtyfour::{DesiredCapabilities, SessionId};

use crate::error::HarnessResult;
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};
use crate::http::reqwest_sync::ReqwestDriverSync;
use crate::session::{start_session, WebDriverSession};

/// The WebDriver struct represents a browser session backed by reqwest.
pub type WebDriver = GenericWebDriver<ReqwestDriverSync>;

/// Chrome capabilities suitable for a container-hosted grid.
pub fn chrome_capabilities(headless: bool) -> HarnessResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_chrome_arg("--no-sandbox")?;
    caps.add_chrome_arg("--disable-dev-shm-usage")?;
    if headless {
        caps.set_headless()?;
    }
    Ok(caps)
}

/// This `GenericWebDriver` struct encapsulates a synchronous Selenium WebDriver browser
/// session, generic over the HTTP client used to reach the server.
///
/// It derefs to [`WebDriverSession`], which implements [`Browser`](crate::Browser).
///
/// # Example:
/// ```no_run
/// use cfme_console::prelude::*;
///
/// fn main() -> HarnessResult<()> {
///     let driver = WebDriver::new("http://localhost:4444", chrome_capabilities(true)?)?;
///     driver.get("https://appliance.example.com")?;
///     driver.quit()
/// }
/// ```
#[derive(Debug)]
pub struct GenericWebDriver<T: WebDriverHttpClientSync> {
    pub session: WebDriverSession,
    capabilities: Value,
    quit_on_drop: bool,
    phantom: PhantomData<T>,
}

impl<T: 'static> GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    pub fn new<C>(server_url: &str, capabilities: C) -> HarnessResult<Self>
    where
        C: Serialize,
    {
        Self::new_with_timeout(server_url, capabilities, None)
    }

    /// Creates a new GenericWebDriver just like the `new` function. Allows a
    /// configurable timeout for all HTTP requests including the session creation.
    pub fn new_with_timeout<C>(
        server_url: &str,
        capabilities: C,
        timeout: Option<Duration>,
    ) -> HarnessResult<Self>
    where
        C: Serialize,
    {
        let params = HttpClientCreateParams {
            server_url: server_url.to_string(),
            timeout,
        };
        let conn = T::create(params)?;

        let (session_id, session_capabilities) = start_session(&conn, capabilities)?;
        info!("Started WebDriver session {}", session_id);

        Ok(GenericWebDriver {
            session: WebDriverSession::new(session_id, Arc::new(conn)),
            capabilities: session_capabilities,
            quit_on_drop: true,
            phantom: PhantomData,
        })
    }

    /// The capabilities as returned by the server.
    pub fn capabilities(&self) -> DesiredCapabilities {
        DesiredCapabilities::new(self.capabilities.clone())
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.session_id()
    }

    /// End the webdriver session.
    pub fn quit(mut self) -> HarnessResult<()> {
        self.session.cmd(Command::DeleteSession)?;
        self.quit_on_drop = false;
        Ok(())
    }
}

impl<T> Deref for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    type Target = WebDriverSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl<T> Drop for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Close the current session when the WebDriver struct goes out of scope.
    fn drop(&mut self) {
        if self.quit_on_drop && !self.session.session_id().is_empty() {
            if let Err(e) = self.session.cmd(Command::DeleteSession) {
                error!("Failed to close session: {:?}", e);
            }
        }
    }
}
