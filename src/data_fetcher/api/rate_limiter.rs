//! Sliding-window request budget shared by every outgoing call.

use crate::constants::rate_limit;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Admits at most `max_calls` in any rolling `period`. Callers over budget
/// wait until the oldest call leaves the window; nothing is ever rejected.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    period: Duration,
    calls: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            period,
            calls: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    /// The budget the Battle.net API enforces per client.
    pub fn battle_net() -> Self {
        Self::new(
            rate_limit::MAX_CALLS,
            Duration::from_millis(rate_limit::PERIOD_MS),
        )
    }

    /// Waits for a free slot in the window and claims it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut calls = self.calls.lock().await;
                let now = Instant::now();
                while calls
                    .front()
                    .is_some_and(|oldest| now.duration_since(*oldest) >= self.period)
                {
                    calls.pop_front();
                }

                if calls.len() < self.max_calls {
                    calls.push_back(now);
                    return;
                }

                match calls.front() {
                    Some(oldest) => (*oldest + self.period).saturating_duration_since(now),
                    None => Duration::ZERO,
                }
            };

            debug!("Rate limit reached, waiting {:?}", wait);
            sleep(wait).await;
        }
    }

    #[cfg(test)]
    async fn calls_in_window(&self) -> usize {
        let calls = self.calls.lock().await;
        let now = Instant::now();
        calls
            .iter()
            .filter(|at| now.duration_since(**at) < self.period)
            .count()
    }
}
