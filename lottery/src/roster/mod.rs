//! Boundaries with the spreadsheet collaborators: rows in, winners table out.
pub mod errors;

pub mod import;
pub mod export;

pub const NAME_COLUMN: &'static str = "name";
pub const EMAIL_COLUMN: &'static str = "email";
pub const PRIZE_COLUMN: &'static str = "Prize";
