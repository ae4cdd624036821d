//! Field-level validation for form answers.
//!
//! Every check is a pure function taking the raw user text and returning
//! either the normalized (trimmed) value or a [`ValidationError`] carrying a
//! human-readable reason. Lengths are counted in characters, not bytes.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Default minimum length for free-text fields.
pub const DEFAULT_TEXT_MIN: usize = 5;
/// Maximum length for free-text fields.
pub const TEXT_MAX: usize = 2000;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 200;
const CONTRACT_NAME_MAX: usize = 100;
const REQUISITES_MIN: usize = 10;
const REQUISITES_MAX: usize = 1000;

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("date pattern is valid"));

/// Rejection of a single answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    /// Reason shown to the user next to the re-asked question.
    pub reason: String,
}

impl ValidationError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type ValidationResult = Result<String, ValidationError>;

/// Semantic kind of a form field, selecting which check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Contract name or number.
    ContractName,
    /// Contract date, `DD.MM.YYYY`.
    Date,
    /// Person or organization name; the label names the party in messages.
    PartyName(&'static str),
    /// Money amount in free form, must mention a number.
    Money,
    /// Free text with a minimum length.
    Text { label: &'static str, min: usize },
    /// Bank and legal requisites block.
    Requisites,
}

impl FieldKind {
    /// Free text with the default minimum length.
    pub const fn text(label: &'static str) -> Self {
        Self::Text {
            label,
            min: DEFAULT_TEXT_MIN,
        }
    }

    /// Runs the check for this kind.
    pub fn validate(self, raw: &str) -> ValidationResult {
        match self {
            Self::ContractName => validate_contract_name(raw),
            Self::Date => validate_date(raw),
            Self::PartyName(label) => validate_name(raw, label),
            Self::Money => validate_money_amount(raw),
            Self::Text { label, min } => validate_text_field(raw, label, min),
            Self::Requisites => validate_requisites(raw),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Date in `DD.MM.YYYY` form that exists in the calendar.
pub fn validate_date(raw: &str) -> ValidationResult {
    let value = raw.trim();
    let reason = "Неверный формат даты. Используйте формат ДД.ММ.ГГГГ (например: 01.01.2025)";

    if !DATE_SHAPE.is_match(value) {
        return Err(ValidationError::new(reason));
    }
    NaiveDate::parse_from_str(value, "%d.%m.%Y").map_err(|_| ValidationError::new(reason))?;

    Ok(value.to_string())
}

/// Contract name: 1..=100 characters after trimming.
pub fn validate_contract_name(raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new("Название договора не может быть пустым"));
    }
    if char_len(value) > CONTRACT_NAME_MAX {
        return Err(ValidationError::new(format!(
            "Название договора слишком длинное (максимум {} символов)",
            CONTRACT_NAME_MAX
        )));
    }
    Ok(value.to_string())
}

/// Person or organization name: 2..=200 characters after trimming.
pub fn validate_name(raw: &str, field_name: &str) -> ValidationResult {
    let value = raw.trim();
    if char_len(value) < NAME_MIN {
        return Err(ValidationError::new(format!(
            "{} должно содержать минимум {} символа",
            field_name, NAME_MIN
        )));
    }
    if char_len(value) > NAME_MAX {
        return Err(ValidationError::new(format!(
            "{} слишком длинное (максимум {} символов)",
            field_name, NAME_MAX
        )));
    }
    Ok(value.to_string())
}

/// Money amount: non-empty and contains at least one digit.
pub fn validate_money_amount(raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new("Сумма не может быть пустой"));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "Сумма должна содержать числовое значение",
        ));
    }
    Ok(value.to_string())
}

/// Free text: `min_length..=2000` characters.
pub fn validate_text_field(raw: &str, field_name: &str, min_length: usize) -> ValidationResult {
    let value = raw.trim();
    if char_len(value) < min_length {
        return Err(ValidationError::new(format!(
            "{} должно содержать минимум {} символов",
            field_name, min_length
        )));
    }
    if char_len(value) > TEXT_MAX {
        return Err(ValidationError::new(format!(
            "{} слишком длинное (максимум {} символов)",
            field_name, TEXT_MAX
        )));
    }
    Ok(value.to_string())
}

/// Requisites block: 10..=1000 characters.
pub fn validate_requisites(raw: &str) -> ValidationResult {
    let value = raw.trim();
    if char_len(value) < REQUISITES_MIN {
        return Err(ValidationError::new(format!(
            "Реквизиты должны содержать минимум {} символов",
            REQUISITES_MIN
        )));
    }
    if char_len(value) > REQUISITES_MAX {
        return Err(ValidationError::new(format!(
            "Реквизиты слишком длинные (максимум {} символов)",
            REQUISITES_MAX
        )));
    }
    Ok(value.to_string())
}
