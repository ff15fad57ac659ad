use std::fmt;
use ledger::model::Winner;
use super::errors::RosterError;
use super::{NAME_COLUMN, PRIZE_COLUMN};

/// One header line and one row per winner, ready for a spreadsheet writer.
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>
}

impl fmt::Display for WinnerTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.headers.join("\t"))?;
        for row in &self.rows {
            writeln!(f, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

fn cell(winner: &Winner, column: &str) -> String {
    match winner.raw_data.get(column) {
        Some(value) => value.to_owned(),
        None if column == NAME_COLUMN => winner.name.clone(),
        None => String::new()
    }
}

/// Columns come from the first winner's source record, plus a trailing prize column.
/// Winners added by hand have no source record and export their display name.
pub fn export_winners(winners: &[Winner]) -> Result<WinnerTable, RosterError> {
    let first = winners.first().ok_or(RosterError::NoWinnersToExport)?;
    let columns: Vec<String> = if first.raw_data.is_empty() {
        vec![NAME_COLUMN.to_owned()]
    } else {
        first.raw_data.keys().into_iter().map(|key| key.to_owned()).collect()
    };

    let rows = winners.iter()
        .map(|winner| {
            let mut row: Vec<String> = columns.iter().map(|column| cell(winner, column)).collect();
            row.push(winner.prize.clone());
            row
        })
        .collect();

    let mut headers = columns;
    headers.push(PRIZE_COLUMN.to_owned());
    debug!("Exporting {} winners", winners.len());
    Ok(WinnerTable { headers, rows })
}
