use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Fixed-period ticker for the polling loops. The first tick fires
/// immediately; a slow iteration pushes the next tick back instead of
/// queueing catch-up ticks.
pub fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticker_delays_missed_ticks() {
        let ticker = ticker(Duration::from_millis(100));
        assert_eq!(ticker.missed_tick_behavior(), MissedTickBehavior::Delay);
        assert_eq!(ticker.period(), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let mut ticker = ticker(Duration::from_secs(3600));
        let started = tokio::time::Instant::now();
        ticker.tick().await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
