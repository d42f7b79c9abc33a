use serde::Deserialize;
use thiserror::Error;

/// Largest accepted amount, 99,999,999.99.
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount '{0}' is not a valid number with at most two decimals")]
    Malformed(String),
    #[error("amount must not exceed 99,999,999.99")]
    TooLarge,
}

/// Amount as it arrives in a JSON body: `49.5` and `"49.50"` are both accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    pub fn to_cents(&self) -> Result<i64, AmountError> {
        match self {
            AmountInput::Number(number) => parse_amount_to_cents(&number.to_string()),
            AmountInput::Text(text) => parse_amount_to_cents(text),
        }
    }
}

pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    let whole = abs / 100;
    let frac = abs % 100;
    format!("{sign}{whole}.{frac:02}")
}

/// Like [`format_money`] but with thousands separators, e.g. `12,345.60`.
pub fn format_money_grouped(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    let whole = (abs / 100).to_string();
    let frac = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac:02}")
}

pub fn parse_amount_to_cents(input: &str) -> Result<i64, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    if s.starts_with('-') {
        return Err(AmountError::Negative);
    }
    let malformed = || AmountError::Malformed(s.to_string());
    let s = s.replace(',', ".");
    let mut parts = s.split('.');
    let whole_str = parts.next().ok_or_else(malformed)?;
    let frac_str = parts.next();
    if parts.next().is_some() {
        return Err(malformed());
    }
    if whole_str.is_empty() || !whole_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let whole: i64 = match whole_str.parse() {
        Ok(whole) => whole,
        Err(_) => return Err(AmountError::TooLarge),
    };
    let frac = match frac_str {
        None => 0,
        Some(frac) => {
            if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let mut padded = frac.to_string();
            while padded.len() < 2 {
                padded.push('0');
            }
            padded.parse::<i64>().map_err(|_| malformed())?
        }
    };
    whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .filter(|&cents| cents <= MAX_AMOUNT_CENTS)
        .ok_or(AmountError::TooLarge)
}
