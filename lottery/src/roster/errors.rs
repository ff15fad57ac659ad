#[derive(Debug, Fail, PartialEq)]
pub enum RosterError {
    #[fail(display = "No winners to export")]
    NoWinnersToExport
}
