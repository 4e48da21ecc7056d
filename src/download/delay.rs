//! Pause inserted between consecutive image requests.
//!
//! Some marketplaces throttle clients that fetch images back-to-back, so a
//! run can sleep a random amount of time before each request after the
//! first one. [`RequestPacer`] carries that state across every list of a run.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, instrument};

use super::constants::{RANDOM_DELAY_MAX, RANDOM_DELAY_MIN};

/// Delay policy applied between consecutive requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestDelay {
    /// Requests are issued back-to-back.
    #[default]
    None,
    /// Sleep a uniformly random duration in `min..=max`.
    Random {
        /// Shortest pause.
        min: Duration,
        /// Longest pause.
        max: Duration,
    },
}

impl RequestDelay {
    /// The 1-3 second randomized pause.
    #[must_use]
    pub fn random_default() -> Self {
        Self::Random {
            min: RANDOM_DELAY_MIN,
            max: RANDOM_DELAY_MAX,
        }
    }

    /// Returns true when no pause is applied.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        match self {
            Self::None => true,
            Self::Random { max, .. } => max.is_zero(),
        }
    }

    /// Picks the pause for the next request.
    ///
    /// Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn sample(&self) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Random { min, max } => {
                let (low, high) = if min <= max { (min, max) } else { (max, min) };
                let low_ms = u64::try_from(low.as_millis()).unwrap_or(u64::MAX);
                let high_ms = u64::try_from(high.as_millis()).unwrap_or(u64::MAX);
                let mut rng = rand::thread_rng();
                Duration::from_millis(rng.gen_range(low_ms..=high_ms))
            }
        }
    }

    /// Sleeps for a sampled duration; returns immediately when disabled.
    #[instrument(level = "debug", skip(self))]
    pub async fn wait(&self) {
        if self.is_disabled() {
            return;
        }
        let pause = self.sample();
        debug!(pause_ms = pause.as_millis(), "pausing before next request");
        tokio::time::sleep(pause).await;
    }
}

/// Applies a [`RequestDelay`] before every request except the first one.
///
/// One pacer is shared by all lists of a run, so the pause also separates
/// the last request of one list from the first request of the next.
#[derive(Debug, Clone, Default)]
pub struct RequestPacer {
    delay: RequestDelay,
    sent: bool,
}

impl RequestPacer {
    /// Creates a pacer that has not sent anything yet.
    #[must_use]
    pub fn new(delay: RequestDelay) -> Self {
        Self { delay, sent: false }
    }

    /// Waits as needed, then records that a request is about to go out.
    pub async fn before_request(&mut self) {
        if self.sent {
            self.delay.wait().await;
        }
        self.sent = true;
    }
}
