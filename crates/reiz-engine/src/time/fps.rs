use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of intervals averaged by default.
const DEFAULT_WINDOW: usize = 60;

/// Rolling frame-rate estimate.
///
/// Each `tick` records the interval since the previous tick; `fps` is the
/// reciprocal of the mean interval over the last `window` ticks. Intervals
/// are not clamped, so the estimate reflects what the display really did.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    last: Option<Instant>,
    intervals: VecDeque<Duration>,
    window: usize,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            last: None,
            intervals: VecDeque::with_capacity(window),
            window,
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.intervals.clear();
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last {
            if self.intervals.len() == self.window {
                self.intervals.pop_front();
            }
            self.intervals.push_back(now.saturating_duration_since(last));
        }
        self.last = Some(now);
    }

    /// Number of intervals currently averaged.
    pub fn samples(&self) -> usize {
        self.intervals.len()
    }

    /// Average frames per second, or `0.0` before two ticks were recorded.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.intervals.iter().sum();
        if self.intervals.is_empty() || total.is_zero() {
            return 0.0;
        }
        self.intervals.len() as f64 / total.as_secs_f64()
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rate_before_second_tick() {
        let mut c = FpsCounter::new();
        assert_eq!(c.fps(), 0.0);
        c.tick_at(Instant::now());
        assert_eq!(c.fps(), 0.0);
    }

    #[test]
    fn averages_regular_intervals() {
        let mut c = FpsCounter::new();
        let t0 = Instant::now();
        for i in 0..=10 {
            c.tick_at(t0 + Duration::from_millis(10 * i));
        }
        assert_eq!(c.samples(), 10);
        assert!((c.fps() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn window_forgets_old_intervals() {
        let mut c = FpsCounter::with_window(4);
        let mut t = Instant::now();
        c.tick_at(t);
        // Four slow frames, then four fast ones.
        for _ in 0..4 {
            t += Duration::from_millis(100);
            c.tick_at(t);
        }
        for _ in 0..4 {
            t += Duration::from_millis(5);
            c.tick_at(t);
        }
        assert_eq!(c.samples(), 4);
        assert!((c.fps() - 200.0).abs() < 1e-6);
    }
}
