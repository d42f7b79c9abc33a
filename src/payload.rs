//! Request payloads that create expenses, with their documented defaults.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ExpenseInput, PaymentMode, UnknownPaymentMode};
use crate::money::{AmountError, AmountInput};

/// Title used by `POST /expense` when none is given.
pub const DEFAULT_TITLE: &str = "Miscellaneous Expense";
/// Title used for bulk-uploaded entries without one.
pub const BULK_DEFAULT_TITLE: &str = "Miscellaneous";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error(transparent)]
    PaymentMode(#[from] UnknownPaymentMode),
    #[error("expense_date '{0}' is not a YYYY-MM-DD date")]
    Date(String),
    #[error("file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a list of expenses or an object with an \"expenses\" list")]
    Shape,
    #[error("entry {index}: {reason}")]
    Entry { index: usize, reason: String },
}

/// Optional expense fields shared by single and bulk creation.
///
/// | field          | default                    |
/// |----------------|----------------------------|
/// | `title`        | caller supplied            |
/// | `amount`       | `0.00`                     |
/// | `category`     | "Other" when it exists     |
/// | `payment_mode` | `CASH`                     |
/// | `note`         | empty                      |
/// | `expense_date` | today                      |
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFields {
    pub title: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub payment_mode: Option<String>,
    pub note: Option<String>,
    pub expense_date: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl ExpenseFields {
    pub fn into_input(
        self,
        default_title: &str,
        today: NaiveDate,
    ) -> Result<ExpenseInput, PayloadError> {
        let amount_cents = match &self.amount {
            Some(amount) => amount.to_cents()?,
            None => 0,
        };
        let payment_mode = match non_blank(self.payment_mode) {
            Some(mode) => mode.parse()?,
            None => PaymentMode::default(),
        };
        let expense_date = match non_blank(self.expense_date) {
            Some(date) => {
                NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| PayloadError::Date(date))?
            }
            None => today,
        };

        Ok(ExpenseInput {
            title: non_blank(self.title).unwrap_or_else(|| default_title.to_string()),
            amount_cents,
            category: non_blank(self.category),
            payment_mode,
            note: self.note.unwrap_or_default(),
            expense_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "expenseId", default)]
    pub expense_id: Option<i64>,
    #[serde(flatten)]
    pub fields: ExpenseFields,
}

/// Parses an uploaded expense file: either `[...]` or `{"expenses": [...]}`.
pub fn parse_bulk(bytes: &[u8], today: NaiveDate) -> Result<Vec<ExpenseInput>, PayloadError> {
    let document: Value = serde_json::from_slice(bytes)?;
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("expenses") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(PayloadError::Shape),
        },
        _ => return Err(PayloadError::Shape),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let entry_error = |reason: String| PayloadError::Entry { index, reason };
            let fields: ExpenseFields =
                serde_json::from_value(entry).map_err(|err| entry_error(err.to_string()))?;
            fields
                .into_input(BULK_DEFAULT_TITLE, today)
                .map_err(|err| entry_error(err.to_string()))
        })
        .collect()
}
