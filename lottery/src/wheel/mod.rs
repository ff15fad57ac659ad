//! Spinning wheel: spin animation, frame stream and winner resolution.
pub mod errors;

pub mod layout;
pub mod spin;
pub mod engine;

pub const FULL_TURN: f64 = 360.0;
pub const POINTER_ANGLE: f64 = 270.0;
pub const DEFAULT_SPIN_DURATION_MS: f64 = 5000.0;
pub const DEFAULT_FULL_TURNS: u32 = 5;
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 16.0;

/// Fixed parameters of a wheel.
///
/// The spin duration belongs to the wheel, not to a single spin: every spin of
/// the same engine lasts exactly `spin_duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    pub spin_duration_ms: f64,
    pub full_turns: u32,
    pub pointer_angle: f64,
    pub frame_interval_ms: f64
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            full_turns: DEFAULT_FULL_TURNS,
            pointer_angle: POINTER_ANGLE,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS
        }
    }
}
