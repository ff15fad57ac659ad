#[derive(Debug, Fail, PartialEq)]
pub enum LedgerError {
    #[fail(display = "No more prizes available")]
    NoPrizesAvailable,
    #[fail(display = "A name is required")]
    InvalidManualEntry,
    #[fail(display = "A prize needs a quantity of at least one")]
    InvalidPrizeQuantity,
    #[fail(display = "Unknown participant {}", id)]
    UnknownParticipant {
        id: String
    },
    #[fail(display = "Unknown prize {}", id)]
    UnknownPrize {
        id: String
    }
}
