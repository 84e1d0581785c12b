//! Eased progress bar movement between steps

use std::time::{Duration, Instant};

/// Progress bar value that glides towards its target
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    animate: bool,
    from: f64,
    target: f64,
    started: Option<Instant>,
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressAnimation {
    /// Duration of one transition
    const DURATION: Duration = Duration::from_millis(300);

    pub fn new(animate: bool) -> Self {
        Self {
            animate,
            from: 0.0,
            target: 0.0,
            started: None,
        }
    }

    /// Percentage the controller last reported
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, percent: f64) {
        let percent = percent.clamp(0.0, 100.0);
        self.from = self.value_at(Instant::now());
        self.target = percent;
        self.started = self.animate.then(Instant::now);
    }

    /// Current value to draw
    pub fn value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    pub fn is_running(&self) -> bool {
        self.started
            .is_some_and(|started| started.elapsed() < Self::DURATION)
    }

    fn value_at(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return self.target;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= Self::DURATION {
            return self.target;
        }
        let t = elapsed.as_secs_f32() / Self::DURATION.as_secs_f32();
        let eased = f64::from(simple_easing::cubic_out(t));
        self.from + (self.target - self.from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_animation_jumps_to_target() {
        let mut progress = ProgressAnimation::new(false);
        progress.set_target(100.0 / 3.0);
        assert!((progress.value() - 33.333).abs() < 0.01);
        assert!(!progress.is_running());
    }

    #[test]
    fn test_target_is_clamped() {
        let mut progress = ProgressAnimation::default();
        progress.set_target(140.0);
        assert_eq!(progress.target(), 100.0);
        progress.set_target(-5.0);
        assert_eq!(progress.target(), 0.0);
    }

    #[test]
    fn test_animation_starts_from_previous_value() {
        let mut progress = ProgressAnimation::new(true);
        progress.set_target(50.0);
        let started = progress.started.unwrap();
        assert_eq!(progress.value_at(started), 0.0);
        assert_eq!(progress.value_at(started + Duration::from_secs(1)), 50.0);
        let mid = progress.value_at(started + Duration::from_millis(150));
        assert!(mid > 0.0 && mid < 50.0);
    }
}
