//! Per-caller import quota
//!
//! Fixed-window counter keyed by caller identity. Windows start on a caller's
//! first request and reset once they expire. State is in-process only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Start at the current instant
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Quota settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    /// 5 imports per 15 minutes
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_secs: 15 * 60,
        }
    }
}

impl RateLimitConfig {
    /// Get the window length as a Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("max_requests must be greater than 0".to_string());
        }
        if self.window_secs == 0 {
            return Err("window_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

/// Registry of per-caller request windows
pub struct RateLimitRegistry<C: Clock = SystemClock> {
    config: RateLimitConfig,
    clock: C,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimitRegistry<SystemClock> {
    /// Create a registry on the wall clock
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> RateLimitRegistry<C> {
    /// Create a registry on a custom clock
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `caller`; false when the quota is used up
    ///
    /// A denied request does not count against the window.
    pub fn check(&self, caller: &str) -> bool {
        let now = self.clock.now();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        match windows.get_mut(caller) {
            Some(window) if now <= window.resets_at => {
                if window.count >= self.config.max_requests {
                    warn!("Import quota exhausted for '{}'", caller);
                    return false;
                }
                window.count += 1;
                debug!(
                    "Caller '{}' at {}/{} requests",
                    caller, window.count, self.config.max_requests
                );
                true
            }
            _ => {
                windows.insert(
                    caller.to_string(),
                    Window {
                        count: 1,
                        resets_at: now + self.config.window(),
                    },
                );
                true
            }
        }
    }

    /// Requests still allowed for `caller` in the current window
    pub fn remaining(&self, caller: &str) -> u32 {
        let now = self.clock.now();
        let windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        match windows.get(caller) {
            Some(window) if now <= window.resets_at => {
                self.config.max_requests.saturating_sub(window.count)
            }
            _ => self.config.max_requests,
        }
    }

    /// Number of callers currently tracked
    pub fn tracked_callers(&self) -> usize {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
