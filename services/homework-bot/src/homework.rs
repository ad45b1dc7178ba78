//! Homework records and the verdict table

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ErrorKind;
use crate::BotError;

/// Review outcome reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Status keyword as sent by the API
    pub fn key(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Human-readable text delivered to the chat
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl FromStr for Verdict {
    type Err = BotError;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|verdict| verdict.key() == status)
            .ok_or_else(|| {
                BotError::domain(
                    ErrorKind::UnrecognizedValue,
                    format!("unknown homework status '{}'", status),
                )
            })
    }
}

// Absent, `null` and `""` all count as a missing key.
fn present<'a>(homework: &'a Value, key: &str) -> crate::Result<&'a Value> {
    match homework.get(key) {
        None | Some(Value::Null) => Err(missing(key)),
        Some(Value::String(value)) if value.is_empty() => Err(missing(key)),
        Some(value) => Ok(value),
    }
}

fn missing(key: &str) -> BotError {
    BotError::domain(ErrorKind::MissingKey, format!("key '{}' is missing", key))
}

fn homework_name(homework: &Value) -> crate::Result<&str> {
    let value = present(homework, "homework_name")?;
    value.as_str().ok_or_else(|| {
        BotError::domain(
            ErrorKind::TypeMismatch,
            format!("key 'homework_name' must be a string, got {}", value),
        )
    })
}

fn status_verdict(homework: &Value) -> crate::Result<Verdict> {
    match present(homework, "status")? {
        Value::String(status) => status.parse(),
        other => Err(BotError::domain(
            ErrorKind::UnrecognizedValue,
            format!("unknown homework status '{}'", other),
        )),
    }
}

/// Build the status-change message for a single homework record
pub fn parse_status(homework: &Value) -> crate::Result<String> {
    if !homework.is_object() {
        return Err(BotError::domain(
            ErrorKind::TypeMismatch,
            "homework record must be an object",
        ));
    }

    let name = homework_name(homework)?;
    let verdict = status_verdict(homework)?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name, verdict
    ))
}
