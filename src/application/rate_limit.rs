use crate::error::{Result, ValuationError};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// Fixed-window limiter keyed by submitter (an address, an email, a session).
///
/// Owned by whoever constructs it; nothing here is process-global.
#[derive(Debug, Default)]
struct Windows {
    entries: HashMap<String, Window>,
    last_sweep: Option<DateTime<Utc>>,
}

impl Windows {
    fn sweep(&mut self, now: DateTime<Utc>, window: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.started_at < window);
        self.last_sweep = Some(now);
        before - self.entries.len()
    }
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: RwLock<Windows>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: RwLock::new(Windows::default()),
        }
    }

    /// Records one request for `key`, failing once the window is full.
    ///
    /// Elapsed windows are swept at most once per window length, so the map
    /// only holds keys seen within roughly the last two windows.
    pub async fn check(&self, key: &str, now: DateTime<Utc>) -> Result<()> {
        let mut windows = self.windows.write().await;
        let sweep_due = windows
            .last_sweep
            .is_none_or(|last| now - last >= self.window);
        if sweep_due {
            windows.sweep(now, self.window);
        }

        let window = windows.entries.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now - window.started_at >= self.window {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            tracing::warn!(key, "rate limit exceeded");
            return Err(ValuationError::RateLimited {
                key: key.to_string(),
            });
        }
        window.count += 1;
        Ok(())
    }

    /// Drops windows that have fully elapsed.
    pub async fn prune(&self, now: DateTime<Utc>) -> usize {
        self.windows.write().await.sweep(now, self.window)
    }

    /// Number of keys currently holding a window.
    pub async fn tracked_keys(&self) -> usize {
        self.windows.read().await.entries.len()
    }
}
