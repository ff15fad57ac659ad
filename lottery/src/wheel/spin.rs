use rand::Rng;
use super::FULL_TURN;

/// `1 - (1 - x)^4`: fast start, smooth stop with zero velocity at `x = 1`.
pub fn ease_out_quartic(x: f64) -> f64 {
    let x = x.max(0.0).min(1.0);
    1.0 - (1.0 - x).powi(4)
}

/// Whole number of degrees in `[0, 360)` added on top of the full turns.
pub fn random_extra_degrees<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(0u32, 360u32))
}

/// A single planned spin: where it starts, how far it goes and how long it takes.
///
/// The whole animation is a pure function of the elapsed time, so a spin can be
/// replayed or sampled at arbitrary instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    start_rotation: f64,
    delta: f64,
    duration_ms: f64
}

impl Spin {
    pub fn new(start_rotation: f64, full_turns: u32, extra_degrees: f64, duration_ms: f64) -> Spin {
        Spin {
            start_rotation,
            delta: f64::from(full_turns) * FULL_TURN + extra_degrees,
            duration_ms: duration_ms.max(0.0)
        }
    }

    pub fn start_rotation(&self) -> f64 {
        self.start_rotation
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn final_rotation(&self) -> f64 {
        self.start_rotation + self.delta
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Rotation at `elapsed_ms`. Once complete this is exactly the final rotation,
    /// not the eased approximation of it.
    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_complete(elapsed_ms) {
            return self.final_rotation();
        }
        self.start_rotation + self.delta * ease_out_quartic(elapsed_ms / self.duration_ms)
    }

    /// Sample the spin on a virtual clock advancing by `frame_interval_ms`.
    pub fn frames(&self, frame_interval_ms: f64) -> SpinFrames {
        let interval = if frame_interval_ms > 0.0 { frame_interval_ms } else { self.duration_ms.max(1.0) };
        SpinFrames { spin: *self, interval, elapsed: 0.0, done: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub elapsed_ms: f64,
    pub angle: f64,
    pub is_final: bool
}

/// Headless stand-in for a display refresh loop: one item per frame, the last
/// one snapped on the final rotation.
#[derive(Debug, Clone)]
pub struct SpinFrames {
    spin: Spin,
    interval: f64,
    elapsed: f64,
    done: bool
}

impl Iterator for SpinFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        if self.spin.is_complete(self.elapsed) {
            self.done = true;
            return Some(Frame { elapsed_ms: self.spin.duration_ms(), angle: self.spin.final_rotation(), is_final: true });
        }
        let frame = Frame { elapsed_ms: self.elapsed, angle: self.spin.angle_at(self.elapsed), is_final: false };
        self.elapsed += self.interval;
        Some(frame)
    }
}
