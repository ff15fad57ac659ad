use ledger::model::{Participant, SourceRecord};
use super::{EMAIL_COLUMN, NAME_COLUMN};

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Student identifier encoded in an email local part shaped like `21t1020001@...`.
pub fn extract_student_id(email: &str) -> Option<String> {
    let email = email.trim();
    let local = &email[..email.find('@')?];
    let mut parts = local.splitn(2, 't');
    match (parts.next(), parts.next()) {
        (Some(year), Some(number)) if is_digits(year) && is_digits(number) => Some(local.to_owned()),
        _ => None
    }
}

/// Build a participant out of one imported row. Rows without a name are skipped.
pub fn participant_from_row(row: SourceRecord) -> Option<Participant> {
    let name = match row.get(NAME_COLUMN).map(|name| name.trim()) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => return None
    };
    let student_id = row.get(EMAIL_COLUMN)
        .and_then(extract_student_id)
        .unwrap_or_default();
    Some(Participant::new(&name, &student_id, row))
}

pub fn import_participants(rows: Vec<SourceRecord>) -> Vec<Participant> {
    let total = rows.len();
    let participants: Vec<Participant> = rows.into_iter()
        .filter_map(participant_from_row)
        .collect();
    if participants.len() < total {
        warn!("Skipped {} rows without a name", total - participants.len());
    }
    info!("Imported {} participants", participants.len());
    participants
}
