use std::time::Duration;

use log::debug;
use thirtyfour::By;

use crate::browser::Browser;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::query::poller::{Clock, SystemClock};
use crate::query::waiter::Wait;
use crate::version::Version;
use crate::webelement::WebElement;

/// The context every page object works through: the browser session, the
/// harness configuration and the clock used for waits.
#[derive(Debug)]
pub struct Appliance<'a> {
    browser: &'a dyn Browser,
    config: &'a HarnessConfig,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> Appliance<'a> {
    pub fn new(browser: &'a dyn Browser, config: &'a HarnessConfig) -> Self {
        Appliance {
            browser,
            config,
            clock: Box::new(SystemClock::new()),
        }
    }

    /// Replace the wall clock, e.g. with a [`ManualClock`](crate::ManualClock) in tests.
    pub fn with_clock<C: Clock + 'a>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn browser(&self) -> &'a dyn Browser {
        self.browser
    }

    pub fn config(&self) -> &'a HarnessConfig {
        self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn version(&self) -> &'a Version {
        &self.config.appliance_version
    }

    /// A wait bounded by `timeout`, polling at the configured interval.
    pub fn wait(&self, timeout: Duration) -> Wait<'_> {
        Wait::new(self.clock(), timeout).interval(self.config.waits.interval())
    }

    pub fn find(&self, by: By<'_>) -> HarnessResult<WebElement<'a>> {
        WebElement::find(self.browser, by)
    }

    pub fn find_all(&self, by: By<'_>) -> HarnessResult<Vec<WebElement<'a>>> {
        WebElement::find_all(self.browser, by)
    }

    pub fn click(&self, by: By<'_>) -> HarnessResult<()> {
        self.find(by)?.click()
    }

    /// Whether an element matching `by` is present and displayed. Absence
    /// is `false`, not an error.
    pub fn is_displayed(&self, by: By<'_>) -> HarnessResult<bool> {
        match self.find(by) {
            Ok(elem) => elem.is_displayed(),
            Err(HarnessError::ElementNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Load a path relative to the appliance base URL.
    pub fn navigate(&self, path: &str) -> HarnessResult<()> {
        let url = self.config.url(path);
        debug!("Navigating to {}", url);
        self.browser.get(&url)
    }

    pub fn refresh(&self) -> HarnessResult<()> {
        self.browser.refresh()
    }
}
