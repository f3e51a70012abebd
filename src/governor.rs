use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep, so a cancellation is noticed quickly.
pub const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Check that a frames-per-second value can be turned into a delay.
pub fn check_rate(rate: f64) -> Result<(), String> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(format!("Invalid rate: {} (must be >= 0)", rate));
    }
    if rate > 0.0 && Duration::try_from_secs_f64(1.0 / rate).is_err() {
        return Err(format!("Invalid rate: {} (too small)", rate));
    }
    Ok(())
}

/// Turns a target frames-per-second into the pause between two cycles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RateGovernor {
    rate: f64,
    delay: Option<Duration>,
}

impl RateGovernor {
    /// A rate of 0 means no pacing at all.
    pub fn new(rate: f64) -> Result<Self, String> {
        check_rate(rate)?;

        let delay = if rate == 0.0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / rate))
        };

        Ok(RateGovernor { rate, delay })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Wait one inter-send delay, in slices of at most [SLEEP_SLICE].
    ///
    /// Returns early once `running` goes false. The return value tells whether
    /// the full delay elapsed.
    pub fn pace(&self, running: &AtomicBool) -> bool {
        let delay = match self.delay {
            Some(delay) => delay,
            None => return running.load(Ordering::SeqCst),
        };

        // No representable deadline: wait until cancelled.
        let deadline = Instant::now().checked_add(delay);
        loop {
            if !running.load(Ordering::SeqCst) {
                return false;
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return true;
                    }
                    (deadline - now).min(SLEEP_SLICE)
                }
                None => SLEEP_SLICE,
            };
            thread::sleep(slice);
        }
    }
}
