//! Month-by-month totals and the changes between consecutive months.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::Expense;
use crate::money::format_money_grouped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// First day of the month; orders months chronologically.
    pub month: NaiveDate,
    pub total_cents: i64,
}

impl MonthlyTotal {
    /// `"Jan 2025"`.
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    /// Also used when the total did not change.
    Decrease,
}

impl Direction {
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Increase => "increased",
            Direction::Decrease => "decreased",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthDelta {
    pub from_label: String,
    pub to_label: String,
    pub delta_cents: i64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trend {
    pub months: Vec<MonthlyTotal>,
    pub deltas: Vec<MonthDelta>,
}

pub fn monthly_trend<'a, I>(expenses: I) -> Trend
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for expense in expenses {
        let key = (expense.expense_date.year(), expense.expense_date.month());
        let total = totals.entry(key).or_insert(0);
        *total = total.saturating_add(expense.amount_cents);
    }

    let months: Vec<MonthlyTotal> = totals
        .into_iter()
        .filter_map(|((year, month), total_cents)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|month| MonthlyTotal { month, total_cents })
        })
        .collect();

    let deltas = months
        .windows(2)
        .map(|pair| {
            let delta_cents = pair[1].total_cents.saturating_sub(pair[0].total_cents);
            MonthDelta {
                from_label: pair[0].label(),
                to_label: pair[1].label(),
                delta_cents,
                direction: if delta_cents > 0 {
                    Direction::Increase
                } else {
                    Direction::Decrease
                },
            }
        })
        .collect();

    Trend { months, deltas }
}

impl Trend {
    /// Human readable month-over-month lines. Always yields at least one line.
    pub fn narrative(&self, currency: &str) -> Vec<String> {
        if self.deltas.is_empty() {
            let line = if self.months.is_empty() {
                "No expenses recorded, no comparison possible."
            } else {
                "Only one month of data available, no comparison possible."
            };
            return vec![line.to_string()];
        }

        self.deltas
            .iter()
            .map(|delta| {
                format!(
                    "From {} to {}, expenses {} by {} {}.",
                    delta.from_label,
                    delta.to_label,
                    delta.direction.verb(),
                    currency,
                    format_money_grouped(delta.delta_cents.abs())
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMode;
    use crate::summary::tests::expense;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn months_sort_chronologically_not_by_label() {
        let expenses = vec![
            expense(1, None, 1000, PaymentMode::Cash, day(2025, 1, 20)),
            expense(2, None, 500, PaymentMode::Cash, day(2024, 12, 3)),
            expense(3, None, 250, PaymentMode::Cash, day(2025, 4, 1)),
            expense(4, None, 250, PaymentMode::Cash, day(2025, 1, 2)),
            expense(5, None, 900, PaymentMode::Cash, day(2025, 3, 31)),
        ];

        let trend = monthly_trend(&expenses);
        let labels: Vec<_> = trend.months.iter().map(MonthlyTotal::label).collect();
        assert_eq!(labels, vec!["Dec 2024", "Jan 2025", "Mar 2025", "Apr 2025"]);
        assert_eq!(trend.months[1].total_cents, 1250);
    }

    #[test]
    fn deltas_follow_consecutive_months() {
        let expenses = vec![
            expense(1, None, 500, PaymentMode::Cash, day(2024, 12, 3)),
            expense(2, None, 1500, PaymentMode::Cash, day(2025, 1, 20)),
            expense(3, None, 1500, PaymentMode::Cash, day(2025, 2, 20)),
            expense(4, None, 200, PaymentMode::Cash, day(2025, 3, 20)),
        ];

        let trend = monthly_trend(&expenses);
        let summary: Vec<_> = trend
            .deltas
            .iter()
            .map(|d| (d.to_label.as_str(), d.delta_cents, d.direction))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Jan 2025", 1000, Direction::Increase),
                ("Feb 2025", 0, Direction::Decrease),
                ("Mar 2025", -1300, Direction::Decrease),
            ]
        );
        assert_eq!(
            trend.narrative("Rs")[0],
            "From Dec 2024 to Jan 2025, expenses increased by Rs 10.00."
        );
        assert_eq!(
            trend.narrative("Rs")[2],
            "From Feb 2025 to Mar 2025, expenses decreased by Rs 13.00."
        );
    }

    #[test]
    fn short_histories_get_a_placeholder() {
        let empty = monthly_trend(std::iter::empty());
        assert!(empty.months.is_empty());
        assert_eq!(empty.narrative("Rs").len(), 1);

        let single = vec![expense(1, None, 500, PaymentMode::Cash, day(2025, 5, 5))];
        let trend = monthly_trend(&single);
        assert!(trend.deltas.is_empty());
        assert_eq!(
            trend.narrative("Rs"),
            vec!["Only one month of data available, no comparison possible."]
        );
    }
}
