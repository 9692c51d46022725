use std::time::Instant;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::limiter::rate_limiter::FixedWindowLimiter;

/// Periodically evicts rate-limit entries whose window is long gone.
pub async fn start_limiter_sweep(limiter: FixedWindowLimiter, every: Duration) {
    let mut interval = interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let removed = limiter.sweep(Instant::now());
        if removed > 0 {
            tracing::info!("Evicted {} expired rate-limit entries ({} tracked)", removed, limiter.len());
        }
    }
}
