use lucky_wheel::ledger::store::{Award, LedgerStats};

/// One display refresh, stamped with milliseconds since the loop started.
pub struct FrameTick {
    pub now_ms: f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinishReason {
    NoParticipantsLeft,
    NoPrizesLeft,
}

pub enum FrameResponse {
    Turning {
        angle: f64
    },
    Awarded {
        award: Award
    },
    Finished {
        reason: FinishReason
    },
    UnexpectedError {
        error: failure::Error
    },
}

pub struct ExportWinners {}

pub struct GetStats {}

#[derive(Debug)]
pub struct Summary {
    pub stats: LedgerStats
}
