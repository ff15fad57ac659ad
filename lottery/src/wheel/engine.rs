use rand::Rng;
use super::{WheelConfig, FULL_TURN};
use super::errors::WheelError;
use super::layout::segment_at;
use super::spin::{random_extra_degrees, Spin};

/// Result of advancing the wheel to a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Nothing in flight: never started, already stopped or torn down.
    Idle,
    Turning { angle: f64 },
    Stopped { final_rotation: f64, winner: usize }
}

#[derive(Debug, Clone)]
struct ActiveSpin {
    spin: Spin,
    segment_count: usize,
    started_at_ms: f64
}

/// Stateful wheel driven by host ticks.
///
/// The host owns the clock: it calls `tick` with its own millisecond timestamps
/// whenever it is ready to render a frame. Not calling `tick` anymore simply
/// freezes the wheel.
#[derive(Debug, Clone)]
pub struct WheelEngine {
    config: WheelConfig,
    rotation: f64,
    active: Option<ActiveSpin>
}

impl Default for WheelEngine {
    fn default() -> Self {
        WheelEngine::new(WheelConfig::default())
    }
}

impl WheelEngine {
    pub fn new(config: WheelConfig) -> WheelEngine {
        WheelEngine { config, rotation: 0.0, active: None }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Last published rotation, in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    pub fn start_spin<S, R: Rng>(&mut self, segments: &[S], rng: &mut R, now_ms: f64) -> Result<Spin, WheelError> {
        let extra = random_extra_degrees(rng);
        self.start_spin_with_offset(segments, extra, now_ms)
    }

    /// Same as `start_spin` with the random part of the rotation given by the caller.
    pub fn start_spin_with_offset<S>(&mut self, segments: &[S], extra_degrees: f64, now_ms: f64) -> Result<Spin, WheelError> {
        if segments.is_empty() {
            return Err(WheelError::EmptySegmentSet);
        }
        if self.active.is_some() {
            return Err(WheelError::SpinInProgress);
        }
        if !(extra_degrees >= 0.0 && extra_degrees < FULL_TURN) {
            return Err(WheelError::InvalidExtraRotation { degrees: extra_degrees });
        }
        let spin = Spin::new(self.rotation, self.config.full_turns, extra_degrees, self.config.spin_duration_ms);
        debug!("Spin started from {} towards {} over {} segments", spin.start_rotation(), spin.final_rotation(), segments.len());
        self.active = Some(ActiveSpin { spin, segment_count: segments.len(), started_at_ms: now_ms });
        Ok(spin)
    }

    /// Segment under this wheel's pointer for a wheel stopped at `final_rotation`.
    pub fn resolve_winner<S>(&self, final_rotation: f64, segments: &[S]) -> Option<usize> {
        segment_at(final_rotation, segments.len(), self.config.pointer_angle)
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let (spin, segment_count, started_at_ms) = match self.active {
            Some(ref active) => (active.spin, active.segment_count, active.started_at_ms),
            None => return Tick::Idle
        };
        let elapsed = (now_ms - started_at_ms).max(0.0);
        if !spin.is_complete(elapsed) {
            self.rotation = spin.angle_at(elapsed);
            return Tick::Turning { angle: self.rotation };
        }

        self.active = None;
        self.rotation = spin.final_rotation();
        match segment_at(self.rotation, segment_count, self.config.pointer_angle) {
            Some(winner) => {
                debug!("Spin stopped at {} on segment {}", self.rotation, winner);
                Tick::Stopped { final_rotation: self.rotation, winner }
            }
            None => Tick::Idle
        }
    }

    /// Drop the spin in flight without resolving it. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.active.take().is_some();
        if cancelled {
            debug!("Spin cancelled at {}", self.rotation);
        }
        cancelled
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn segments() -> Vec<&'static str> {
        vec!["A", "B", "C", "D"]
    }

    #[test]
    fn test_reference_spin() {
        let mut engine = WheelEngine::default();
        let spin = engine.start_spin_with_offset(&segments(), 90.0, 1000.0).unwrap();
        assert_eq!(spin.final_rotation(), 1890.0);
        assert!(engine.is_spinning());

        match engine.tick(3500.0) {
            Tick::Turning { angle } => assert!(angle > 0.0 && angle < 1890.0),
            other => panic!("unexpected tick {:?}", other)
        }

        assert_eq!(engine.tick(6000.0), Tick::Stopped { final_rotation: 1890.0, winner: 2 });
        assert!(!engine.is_spinning());
        assert_eq!(engine.rotation(), 1890.0);
        assert_eq!(engine.tick(7000.0), Tick::Idle);
    }

    #[test]
    fn test_overdue_tick_snaps_to_final_rotation() {
        let mut engine = WheelEngine::default();
        engine.start_spin_with_offset(&segments(), 33.0, 0.0).unwrap();
        assert_eq!(engine.tick(999_999.0), Tick::Stopped { final_rotation: 1833.0, winner: 2 });
    }

    #[test]
    fn test_next_spin_starts_from_previous_rotation() {
        let mut engine = WheelEngine::default();
        engine.start_spin_with_offset(&segments(), 90.0, 0.0).unwrap();
        engine.tick(5000.0);
        let spin = engine.start_spin_with_offset(&segments(), 0.0, 5000.0).unwrap();
        assert_eq!(spin.start_rotation(), 1890.0);
        assert_eq!(spin.final_rotation(), 3690.0);
    }

    #[test]
    fn test_reject_empty_segments() {
        let mut engine = WheelEngine::default();
        let empty: Vec<String> = vec![];
        assert_eq!(engine.start_spin(&empty, &mut thread_rng(), 0.0), Err(WheelError::EmptySegmentSet));
        assert!(!engine.is_spinning());
        assert_eq!(engine.rotation(), 0.0);
    }

    #[test]
    fn test_reject_reentrant_spin() {
        let mut engine = WheelEngine::default();
        let first = engine.start_spin_with_offset(&segments(), 10.0, 0.0).unwrap();
        assert_eq!(engine.start_spin(&segments(), &mut thread_rng(), 100.0), Err(WheelError::SpinInProgress));
        assert_eq!(engine.tick(5000.0), Tick::Stopped { final_rotation: first.final_rotation(), winner: 2 });
    }

    #[test]
    fn test_reject_extra_rotation_out_of_range() {
        let mut engine = WheelEngine::default();
        for &extra in &[-5000.0, -0.5, 360.0, 725.0, ::std::f64::NAN, ::std::f64::INFINITY] {
            assert_matches!(engine.start_spin_with_offset(&segments(), extra, 0.0), Err(WheelError::InvalidExtraRotation { .. }));
            assert!(!engine.is_spinning());
            assert_eq!(engine.rotation(), 0.0);
        }
        let spin = engine.start_spin_with_offset(&segments(), 359.0, 0.0).unwrap();
        assert!(spin.delta() >= 1800.0);
    }

    #[test]
    fn test_custom_pointer_is_used_for_resolution() {
        let config = WheelConfig { pointer_angle: 90.0, ..WheelConfig::default() };
        let mut engine = WheelEngine::new(config);
        engine.start_spin_with_offset(&segments(), 90.0, 0.0).unwrap();
        // (90 - 90 + 360) mod 360 = 0 lands on the first segment, not "C"
        assert_eq!(engine.tick(5000.0), Tick::Stopped { final_rotation: 1890.0, winner: 0 });
        assert_eq!(engine.resolve_winner(1890.0, &segments()), Some(0));
        assert_eq!(WheelEngine::default().resolve_winner(1890.0, &segments()), Some(2));
    }

    #[test]
    fn test_cancelled_spin_never_resolves() {
        let mut engine = WheelEngine::default();
        engine.start_spin_with_offset(&segments(), 90.0, 0.0).unwrap();
        engine.tick(1000.0);
        let frozen = engine.rotation();
        assert!(engine.cancel());
        assert!(!engine.cancel());
        assert_eq!(engine.tick(6000.0), Tick::Idle);
        assert_eq!(engine.rotation(), frozen);
    }

    #[test]
    fn test_tick_before_start_is_clamped() {
        let mut engine = WheelEngine::default();
        engine.start_spin_with_offset(&segments(), 90.0, 1000.0).unwrap();
        assert_eq!(engine.tick(500.0), Tick::Turning { angle: 0.0 });
    }
}
