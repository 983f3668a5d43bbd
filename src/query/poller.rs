use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Source of time for polling loops.
pub trait Clock: Debug {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration);
}

/// Wall-clock time with real sleeps.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A clock that only moves when slept on or advanced. Clones share the
/// same time, so a fake browser can observe the time its caller waited.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// How long, and how often, to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Poller {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Poller {
            timeout,
            interval,
        }
    }
}

/// Paces a polling loop: call `tick()` after each failed attempt.
#[derive(Debug)]
pub struct PollerTicker<'a> {
    poller: Poller,
    clock: &'a dyn Clock,
    start: Duration,
    cur_tries: u32,
}

impl<'a> PollerTicker<'a> {
    pub fn new(poller: Poller, clock: &'a dyn Clock) -> Self {
        PollerTicker {
            poller,
            clock,
            start: clock.now(),
            cur_tries: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.start)
    }

    /// Wait until the next attempt is due. Returns false once the timeout
    /// has been reached and no further attempt should be made.
    pub fn tick(&mut self) -> bool {
        self.cur_tries += 1;

        if self.elapsed() >= self.poller.timeout {
            return false;
        }

        // Next poll is due no earlier than this long after the first poll started.
        let minimum_elapsed = self.poller.interval * self.cur_tries;
        let actual_elapsed = self.elapsed();
        if actual_elapsed < minimum_elapsed {
            // Never sleep past the deadline.
            let deadline = self.poller.timeout.max(actual_elapsed);
            let target = minimum_elapsed.min(deadline);
            self.clock.sleep(target - actual_elapsed);
        }

        true
    }
}
