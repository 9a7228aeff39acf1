//! Frame-driven clocks
//!
//! All three clocks are fed elapsed time by the loop's single pacing point;
//! none of them blocks or paces on its own. Phase clocks are replaced
//! wholesale at phase boundaries rather than reset in place.

/// Single-shot countdown. `tick` reports completion exactly once, on the
/// first tick where the remaining time crosses zero; the timer is inert
/// afterwards.
#[derive(Debug, Clone)]
pub struct Timer {
    remaining: f32,
    fired: bool,
}

impl Timer {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs,
            fired: false,
        }
    }

    /// Advance by `dt` seconds. Returns true on the completing tick only.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.fired = true;
            return true;
        }
        false
    }

    /// Seconds left, pinned at zero after completion.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.fired
    }
}

/// Count-up clock with no completion. Runs for as long as it is ticked.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    elapsed: f32,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Self-re-arming interval clock. `tick` returns how many whole intervals
/// elapsed, so a long tick yields several completions instead of one late
/// one (animation does not lag under frame drops).
#[derive(Debug, Clone)]
pub struct Periodic {
    interval: f32,
    accumulated: f32,
}

impl Periodic {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulated: 0.0,
        }
    }

    /// Advance by `dt` seconds, returning the number of completed intervals.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.accumulated += dt;
        let mut completions = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            completions += 1;
        }
        completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_down_monotonically() {
        let mut timer = Timer::new(1.0);
        let mut last = timer.remaining();
        for _ in 0..30 {
            timer.tick(0.05);
            assert!(timer.remaining() <= last);
            last = timer.remaining();
        }
    }

    #[test]
    fn test_timer_fires_exactly_once() {
        let mut timer = Timer::new(0.3);
        assert!(!timer.tick(0.2));
        assert!(timer.tick(0.2));
        // Inert afterwards, no retrigger
        for _ in 0..10 {
            assert!(!timer.tick(0.2));
        }
        assert!(timer.is_expired());
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn test_timer_fires_on_exact_boundary() {
        let mut timer = Timer::new(0.5);
        assert!(timer.tick(0.5));
    }

    #[test]
    fn test_stopwatch_accumulates() {
        let mut watch = Stopwatch::new();
        for _ in 0..4 {
            watch.tick(0.25);
        }
        assert!((watch.elapsed() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_periodic_single_interval() {
        let mut clock = Periodic::new(0.1);
        assert_eq!(clock.tick(0.05), 0);
        assert_eq!(clock.tick(0.05), 1);
    }

    #[test]
    fn test_periodic_catches_up_after_long_tick() {
        let mut clock = Periodic::new(0.1);
        // One long tick covers three intervals and leaves 0.05 banked
        assert_eq!(clock.tick(0.35), 3);
        assert_eq!(clock.tick(0.05), 1);
    }

    #[test]
    fn test_periodic_zero_interval_is_inert() {
        let mut clock = Periodic::new(0.0);
        assert_eq!(clock.tick(1.0), 0);
    }
}
