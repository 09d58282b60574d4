use std::time::Duration;

/// Fixed-period tick source fed by variable frame deltas.
///
/// Frame time is accumulated and drained in whole periods, so the update
/// loop runs at its own rate regardless of how often frames are drawn.
#[derive(Debug, Clone, Copy)]
pub struct FixedTicker {
    period: Duration,
    accumulator: Duration,
    max_catch_up: u32,
}

impl FixedTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            max_catch_up: 8,
        }
    }

    /// Limit how many ticks a single long frame may release.
    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up = ticks.max(1);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }

    /// Add elapsed time and return the number of ticks now due.
    ///
    /// Backlog beyond the catch-up limit is dropped rather than replayed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            due += 1;
            if due == self.max_catch_up {
                if self.accumulator >= self.period {
                    tracing::debug!("tick backlog dropped: {:?}", self.accumulator);
                }
                self.accumulator = Duration::from_nanos(
                    (self.accumulator.as_nanos() % self.period.as_nanos()) as u64,
                );
                break;
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut t = FixedTicker::new(Duration::from_millis(16));
        assert_eq!(t.advance(Duration::from_millis(10)), 0);
        assert_eq!(t.advance(Duration::from_millis(10)), 1);
        assert_eq!(t.until_next(), Duration::from_millis(12));
    }

    #[test]
    fn releases_multiple_ticks_for_long_frames() {
        let mut t = FixedTicker::new(Duration::from_millis(16));
        assert_eq!(t.advance(Duration::from_millis(50)), 3);
        assert_eq!(t.until_next(), Duration::from_millis(14));
    }

    #[test]
    fn caps_catch_up() {
        let mut t = FixedTicker::new(Duration::from_millis(16)).with_max_catch_up(4);
        assert_eq!(t.advance(Duration::from_secs(2)), 4);
        assert!(t.until_next() <= t.period());
        assert_eq!(t.advance(Duration::ZERO), 0);
    }
}
