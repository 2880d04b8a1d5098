//! Countdown clock for an active session.
//!
//! The [`Timer`] only produces ticks. The remaining time itself lives in the
//! session, which decides what a tick means.

use core::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};

const PERIOD: Duration = Duration::from_secs(1);

/// Remaining seconds at or below which the clock turns amber.
pub const WARNING_THRESHOLD: u32 = 600;
/// Remaining seconds at or below which the clock turns red.
pub const CRITICAL_THRESHOLD: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    Calm,
    Warning,
    Critical,
}

impl Urgency {
    pub const fn from_remaining(remaining: u32) -> Self {
        if remaining <= CRITICAL_THRESHOLD {
            Self::Critical
        } else if remaining <= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Calm
        }
    }
}

/// Formats seconds as a zero-padded `mm:ss` clock.
pub fn clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Handle to a once-per-second tick stream. At most one stream runs at a time.
#[derive(Default)]
pub struct Timer {
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    /// Starts ticking, replacing any stream that is already running. The
    /// first tick fires one period from now. The stream stops on its own once
    /// `on_tick` returns `false`.
    pub fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> bool + Send + 'static,
    {
        self.cancel();
        log::debug!("Starting countdown timer.");
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + PERIOD, PERIOD);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });
        self.handle = Some(handle);
    }

    /// Stops the running stream, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("Cancelling countdown timer.");
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}
