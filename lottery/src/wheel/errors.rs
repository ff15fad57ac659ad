#[derive(Debug, Fail, PartialEq)]
pub enum WheelError {
    #[fail(display = "Cannot spin a wheel without segments")]
    EmptySegmentSet,
    #[fail(display = "A spin is already in progress")]
    SpinInProgress,
    #[fail(display = "Extra rotation {} is outside [0, 360)", degrees)]
    InvalidExtraRotation {
        degrees: f64
    }
}
