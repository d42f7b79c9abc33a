use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use thiserror::Error;

/// Category every uncategorized expense falls back to.
pub const FALLBACK_CATEGORY: &str = "Other";

pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Food & Dining",
    "Clothing & Fashion",
    "Furniture & Home",
    "Online Delivery",
    "Entertainment",
    "Transport",
    "Utilities & Bills",
    "Medical & Health",
    FALLBACK_CATEGORY,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    Upi,
    BankTransfer,
    Wallet,
    Other,
}

impl PaymentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Cash => "CASH",
            PaymentMode::Card => "CARD",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "BANK_TRANSFER",
            PaymentMode::Wallet => "WALLET",
            PaymentMode::Other => "OTHER",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment mode '{0}'")]
pub struct UnknownPaymentMode(pub String);

impl FromStr for PaymentMode {
    type Err = UnknownPaymentMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMode::Cash),
            "CARD" => Ok(PaymentMode::Card),
            "UPI" => Ok(PaymentMode::Upi),
            "BANK_TRANSFER" => Ok(PaymentMode::BankTransfer),
            "WALLET" => Ok(PaymentMode::Wallet),
            "OTHER" => Ok(PaymentMode::Other),
            _ => Err(UnknownPaymentMode(s.to_string())),
        }
    }
}

impl ToSql for PaymentMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub reg_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub currency: String,
    pub monthly_income_cents: i64,
    pub phone_number: Option<String>,
    pub monthly_budget_cents: i64,
    pub savings_goal_cents: i64,
    pub profile_image: Option<String>,
}

/// Partial profile update; `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub currency: Option<String>,
    pub monthly_income_cents: Option<i64>,
    pub phone_number: Option<String>,
    pub monthly_budget_cents: Option<i64>,
    pub savings_goal_cents: Option<i64>,
}

#[derive(Debug)]
pub struct OtpState {
    pub user_id: i64,
    pub otp: Option<String>,
    pub otp_created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub is_custom: bool,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub title: String,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub payment_mode: PaymentMode,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Fully resolved values for inserting or overwriting an expense row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub title: String,
    pub amount_cents: i64,
    /// Category name; created on demand. `None` means fall back to "Other".
    pub category: Option<String>,
    pub payment_mode: PaymentMode,
    pub note: String,
    pub expense_date: NaiveDate,
}
