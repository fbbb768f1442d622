use std::time::{Duration, Instant};

/// Wall-clock animation time.
///
/// Never clamped or rebased: rotations stay locked to real time across
/// resizes and stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the clock started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_follows_wall_clock() {
        let clock = FrameClock::new();
        let start = clock.start;
        assert_eq!(clock.elapsed_at(start), 0.0);
        assert!((clock.elapsed_at(start + Duration::from_millis(1500)) - 1.5).abs() < 1e-6);
        assert!((clock.elapsed_at(start + Duration::from_secs(90)) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn instants_before_start_read_as_zero() {
        let clock = FrameClock::new();
        let earlier = clock.start.checked_sub(Duration::from_secs(1));
        if let Some(earlier) = earlier {
            assert_eq!(clock.elapsed_at(earlier), 0.0);
        }
    }

    #[test]
    fn elapsed_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
