use std::time::Duration;

use log::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::query::poller::{Clock, Poller, PollerTicker};

type FailFunc<'a> = Box<dyn FnMut() -> HarnessResult<()> + 'a>;

/// Explicit bounded wait, configured with the builder pattern.
///
/// # Example:
/// ```
/// # use cfme_console::prelude::*;
/// # use std::time::Duration;
/// # fn main() -> HarnessResult<()> {
/// let clock = ManualClock::new();
/// let mut attempts = 0;
/// Wait::new(&clock, Duration::from_secs(10))
///     .interval(Duration::from_secs(2))
///     .message("counter to reach 3")
///     .until(|| {
///         attempts += 1;
///         Ok(attempts == 3)
///     })?;
/// assert_eq!(clock.now(), Duration::from_secs(4));
/// # Ok(())
/// # }
/// ```
pub struct Wait<'a> {
    clock: &'a dyn Clock,
    poller: Poller,
    message: String,
    fail_func: Option<FailFunc<'a>>,
    ignore_errors: bool,
}

impl<'a> Wait<'a> {
    /// Wait up to `timeout`, polling once a second.
    pub fn new(clock: &'a dyn Clock, timeout: Duration) -> Self {
        Wait {
            clock,
            poller: Poller::new(timeout, Duration::from_secs(1)),
            message: String::new(),
            fail_func: None,
            ignore_errors: false,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.poller.interval = interval;
        self
    }

    /// Provide a human-readable description to be returned in the case of timeout.
    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    /// Run `f` between failed attempts, e.g. to refresh the page.
    pub fn fail_func<F>(mut self, f: F) -> Self
    where
        F: FnMut() -> HarnessResult<()> + 'a,
    {
        self.fail_func = Some(Box::new(f));
        self
    }

    /// By default errors from the condition end the wait early. With
    /// `ignore_errors(true)` they count as a failed attempt instead.
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// Poll until `condition` returns `Ok(true)`.
    pub fn until<F>(self, mut condition: F) -> HarnessResult<()>
    where
        F: FnMut() -> HarnessResult<bool>,
    {
        self.until_some(|| condition().map(|met| if met { Some(()) } else { None }))
    }

    /// Poll until `f` returns `Ok(Some(value))` and return the value.
    pub fn until_some<T, F>(mut self, mut f: F) -> HarnessResult<T>
    where
        F: FnMut() -> HarnessResult<Option<T>>,
    {
        let mut ticker = PollerTicker::new(self.poller, self.clock);
        loop {
            match f() {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) if self.ignore_errors => debug!("Ignoring error while waiting: {}", e),
                Err(e) => return Err(e),
            }

            if !ticker.tick() {
                return Err(HarnessError::Timeout {
                    message: self.message,
                    elapsed: ticker.elapsed(),
                });
            }

            if let Some(fail_func) = self.fail_func.as_mut() {
                fail_func()?;
            }
        }
    }
}
