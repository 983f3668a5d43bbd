//! Page objects and a console scenario for driving the CFME appliance UI
//! through Selenium / W3C WebDriver.
//!
//! The crate provides a synchronous WebDriver client, a [`Browser`]
//! trait the page objects are written against, and page objects for the
//! HTML5 VM console ([`VmConsole`]) and infrastructure datastores
//! ([`Datastore`]).
//!
//! Every page-object call takes an [`Appliance`]: the browser session, the
//! [`HarnessConfig`] and the [`Clock`] used by waits. Tests can substitute
//! both the browser and the clock.
//!
//! ## Example
//!
//! The following example assumes a selenium server running at
//! localhost:4444 and an appliance with a VM called `cirros-1`.
//!
//! ```no_run
//! use cfme_console::prelude::*;
//!
//! fn main() -> HarnessResult<()> {
//!     let config = HarnessConfig::default();
//!     let driver = WebDriver::new(&config.webdriver_url, chrome_capabilities(config.headless)?)?;
//!     let app = Appliance::new(&*driver, &config);
//!
//!     let provider = ProviderRef::new("rhv", "RHV", ProviderKind::Rhv);
//!     let console = Vm::new("cirros-1", provider).open_console(&app)?;
//!     console.wait_for_connect(&app)?;
//!     let png = console.screen(&app)?;
//!     assert!(cfme_console::console::is_png(&png));
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

/// Re-export the WebDriver types the page objects are written with.
pub use thirtyfour::common::types::{ElementId, WindowHandle};
pub use thirtyfour::error::WebDriverError;
pub use thirtyfour::{By, ScriptArgs, SessionId};

pub use appliance::Appliance;
pub use browser::Browser;
pub use config::HarnessConfig;
pub use console::{ConsoleSession, VmConsole};
pub use datastore::{Datastore, PageState};
pub use error::{HarnessError, HarnessResult};
pub use provider::{ProviderKind, ProviderRef};
pub use query::poller::{Clock, ManualClock, SystemClock};
pub use query::waiter::Wait;
pub use session::WebDriverSession;
pub use version::{Version, VersionPick};
pub use vm::Vm;
pub use webdriver::{GenericWebDriver, WebDriver};
pub use webelement::WebElement;

pub mod prelude {
    pub use crate::appliance::Appliance;
    pub use crate::browser::Browser;
    pub use crate::config::HarnessConfig;
    pub use crate::console::VmConsole;
    pub use crate::datastore::Datastore;
    pub use crate::error::{HarnessError, HarnessResult};
    pub use crate::provider::{ProviderKind, ProviderRef};
    pub use crate::query::poller::{Clock, ManualClock, SystemClock};
    pub use crate::query::waiter::Wait;
    pub use crate::vm::Vm;
    pub use crate::webdriver::{chrome_capabilities, WebDriver};
    pub use thirtyfour::By;
}

mod appliance;
mod browser;
pub mod components {
    pub mod select;
}
pub mod config;
pub mod console;
pub mod datastore;
mod error;
pub mod http {
    pub mod connection_sync;
    pub mod reqwest_sync;
}
pub mod provider;
pub mod query {
    pub mod poller;
    pub mod waiter;
}
pub mod scenario;
mod session;
pub mod version;
mod vm;
pub mod web_ui;
mod webdriver;
mod webelement;
