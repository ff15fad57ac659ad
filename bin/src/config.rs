use std::env;
use failure::Error;
use lucky_wheel::ledger::model::{Participant, SourceRecord};
use lucky_wheel::roster::{EMAIL_COLUMN, NAME_COLUMN};
use lucky_wheel::roster::import::import_participants;
use lucky_wheel::wheel::WheelConfig;
use errors::ConfigError;

const PARTICIPANTS_VAR: &'static str = "LOTTERY_PARTICIPANTS";
const PRIZES_VAR: &'static str = "LOTTERY_PRIZES";
const SPIN_DURATION_VAR: &'static str = "WHEEL_SPIN_DURATION_MS";
const FRAME_INTERVAL_VAR: &'static str = "WHEEL_FRAME_INTERVAL_MS";

const ENTRY_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq)]
pub struct PrizeSpec {
    pub name: String,
    pub image: String,
    pub quantity: u32
}

#[derive(Debug, Clone)]
pub struct Config {
    pub participants: Vec<Participant>,
    pub prizes: Vec<PrizeSpec>,
    pub wheel: WheelConfig,
    pub frame_interval_ms: u64
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Config, Error> {
        let participants = parse_participants(&required(&lookup, PARTICIPANTS_VAR)?)?;
        let prizes = parse_prizes(&required(&lookup, PRIZES_VAR)?)?;
        let spin_duration_ms = millis(&lookup, SPIN_DURATION_VAR, 5000)?;
        let frame_interval_ms = millis(&lookup, FRAME_INTERVAL_VAR, 16)?;
        let wheel = WheelConfig {
            spin_duration_ms: spin_duration_ms as f64,
            frame_interval_ms: frame_interval_ms as f64,
            ..WheelConfig::default()
        };
        Ok(Config { participants, prizes, wheel, frame_interval_ms })
    }
}

fn required<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingVariable { key: key.to_owned() })
}

fn millis<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(ConfigError::InvalidValue { key: key.to_owned(), value })
        }
    }
}

fn entries(raw: &str) -> Vec<&str> {
    raw.split(ENTRY_SEPARATOR)
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// `name` or `name|email` entries, read through the same path as a spreadsheet import.
fn parse_participants(raw: &str) -> Result<Vec<Participant>, ConfigError> {
    let rows = entries(raw).into_iter()
        .map(|entry| {
            let mut fields = entry.splitn(2, '|');
            let mut row = SourceRecord::new();
            if let Some(name) = fields.next() {
                row.insert(NAME_COLUMN, name.trim());
            }
            if let Some(email) = fields.next() {
                row.insert(EMAIL_COLUMN, email.trim());
            }
            row
        })
        .collect();
    let participants = import_participants(rows);
    if participants.is_empty() {
        return Err(ConfigError::EmptyList { key: PARTICIPANTS_VAR.to_owned() });
    }
    Ok(participants)
}

/// `name:quantity[:image]` entries. The image keeps any colon it contains.
fn parse_prizes(raw: &str) -> Result<Vec<PrizeSpec>, ConfigError> {
    let invalid = |entry: &str| ConfigError::InvalidValue { key: PRIZES_VAR.to_owned(), value: entry.to_owned() };
    let prizes = entries(raw).into_iter()
        .map(|entry| -> Result<PrizeSpec, ConfigError> {
            let mut fields = entry.splitn(3, ':');
            let name = fields.next().map(|name| name.trim()).unwrap_or("");
            let quantity = fields.next()
                .and_then(|quantity| quantity.trim().parse::<u32>().ok())
                .ok_or_else(|| invalid(entry))?;
            let image = fields.next().map(|image| image.trim()).unwrap_or("");
            Ok(PrizeSpec { name: name.to_owned(), image: image.to_owned(), quantity })
        })
        .collect::<Result<Vec<PrizeSpec>, ConfigError>>()?;
    if prizes.is_empty() {
        return Err(ConfigError::EmptyList { key: PRIZES_VAR.to_owned() });
    }
    Ok(prizes)
}
