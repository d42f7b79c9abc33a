//! Assembles the expense report document. Layout lives in [`crate::pdf`].

use thiserror::Error;

use crate::models::{Category, Expense, User};
use crate::money::format_money_grouped;
use crate::summary::{summarize, CategoryTotal};
use crate::trend::{monthly_trend, Trend};

pub const CURRENCY_LABEL: &str = "Rs";
pub const REPORT_FOOTER: &str = "@Expense Tracker — Confidential Report";
pub const UNCATEGORIZED_LABEL: &str = "N/A";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No expenses found for this user/category.")]
    EmptyDataset,
    #[error("could not render report: {0}")]
    Render(String),
}

pub fn money_label(cents: i64) -> String {
    format!("{CURRENCY_LABEL} {}", format_money_grouped(cents))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutiveSummary {
    pub total_cents: i64,
    pub average_cents: i64,
    pub max_cents: i64,
    pub min_cents: i64,
    pub count: usize,
    /// Category the report is restricted to, if any.
    pub category: Option<String>,
}

impl ExecutiveSummary {
    fn from_expenses(expenses: &[&Expense], category: Option<&Category>) -> Option<Self> {
        let count = expenses.len();
        let amounts = expenses.iter().map(|expense| expense.amount_cents);
        let max_cents = amounts.clone().max()?;
        let min_cents = amounts.clone().min()?;
        let total_cents = amounts.fold(0_i64, i64::saturating_add);
        let divisor = i64::try_from(count).ok()?;
        let average_cents = total_cents / divisor + i64::from(total_cents % divisor * 2 >= divisor);

        Some(ExecutiveSummary {
            total_cents,
            average_cents,
            max_cents,
            min_cents,
            count,
            category: category.map(|c| c.name.clone()),
        })
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total Spending Recorded: {}", money_label(self.total_cents)),
            format!("Average Expense per Entry: {}", money_label(self.average_cents)),
            format!("Highest Single Expense: {}", money_label(self.max_cents)),
            format!("Lowest Expense Recorded: {}", money_label(self.min_cents)),
            format!("Total Transactions: {}", self.count),
        ];
        lines.push(match &self.category {
            Some(name) => format!("Report focused on Category: {name}"),
            None => "Report includes all categories.".to_string(),
        });
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub title: String,
    pub category: String,
    pub date: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub summary: ExecutiveSummary,
    pub trend: Trend,
    /// Present only for unfiltered reports.
    pub category_breakdown: Option<Vec<CategoryTotal>>,
    pub ledger: Vec<LedgerRow>,
}

impl Report {
    pub fn monthly_rows(&self) -> Vec<[String; 2]> {
        self.trend
            .months
            .iter()
            .map(|month| [month.label(), money_label(month.total_cents)])
            .collect()
    }

    pub fn narrative(&self) -> Vec<String> {
        self.trend.narrative(CURRENCY_LABEL)
    }
}

/// Builds the report for `user` over `expenses`, optionally restricted to one
/// category. Fails with [`ReportError::EmptyDataset`] when nothing matches.
pub fn build_report(
    user: &User,
    expenses: &[Expense],
    category: Option<&Category>,
) -> Result<Report, ReportError> {
    let selected: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| category.is_none_or(|c| expense.category_id == Some(c.id)))
        .collect();

    let summary =
        ExecutiveSummary::from_expenses(&selected, category).ok_or(ReportError::EmptyDataset)?;

    let mut title = format!("Expense Report — {}", user.full_name);
    if let Some(category) = category {
        title.push_str(&format!(" ({})", category.name));
    }

    let category_breakdown = match category {
        Some(_) => None,
        None => Some(summarize(selected.iter().copied()).by_category),
    };

    let ledger = selected
        .iter()
        .map(|expense| LedgerRow {
            title: expense.title.clone(),
            category: expense
                .category_name
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string()),
            date: expense.expense_date.format("%d-%b-%Y").to_string(),
            amount: money_label(expense.amount_cents),
        })
        .collect();

    Ok(Report {
        title,
        summary,
        trend: monthly_trend(selected.iter().copied()),
        category_breakdown,
        ledger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMode;
    use crate::money::MAX_AMOUNT_CENTS;
    use crate::summary::tests::expense;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn user() -> User {
        User {
            id: 1,
            full_name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            reg_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn food() -> Category {
        Category {
            id: 10,
            name: "FOOD".to_string(),
            is_custom: false,
            created_by: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        // `expense` assigns category_id = id * 10, so id 1 is FOOD (10).
        vec![
            expense(1, Some("FOOD"), 123_450, PaymentMode::Cash, day(2025, 1, 5)),
            expense(2, Some("TRANSPORT"), 2_000, PaymentMode::Upi, day(2024, 12, 9)),
            expense(3, None, 1_001, PaymentMode::Card, day(2025, 1, 7)),
        ]
    }

    #[test]
    fn unfiltered_report_has_every_section() {
        let report = build_report(&user(), &sample(), None).unwrap();

        assert_eq!(report.title, "Expense Report — Asha Verma");
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.summary.total_cents, 126_451);
        assert_eq!(report.summary.average_cents, 42_150);
        assert_eq!(report.summary.max_cents, 123_450);
        assert_eq!(report.summary.min_cents, 1_001);
        assert_eq!(
            report.summary.lines()[0],
            "Total Spending Recorded: Rs 1,264.51"
        );
        assert_eq!(
            report.summary.lines().last().unwrap(),
            "Report includes all categories."
        );
        assert_eq!(
            report.monthly_rows(),
            vec![
                ["Dec 2024".to_string(), "Rs 20.00".to_string()],
                ["Jan 2025".to_string(), "Rs 1,244.51".to_string()],
            ]
        );
        assert_eq!(report.narrative().len(), 1);
        assert_eq!(report.category_breakdown.as_ref().map(Vec::len), Some(3));
        assert_eq!(report.ledger.len(), 3);
        assert_eq!(report.ledger[0].date, "05-Jan-2025");
        assert_eq!(report.ledger[2].category, UNCATEGORIZED_LABEL);
    }

    #[test]
    fn category_filter_narrows_and_drops_breakdown() {
        let report = build_report(&user(), &sample(), Some(&food())).unwrap();

        assert_eq!(report.title, "Expense Report — Asha Verma (FOOD)");
        assert_eq!(report.summary.count, 1);
        assert_eq!(
            report.summary.lines().last().unwrap(),
            "Report focused on Category: FOOD"
        );
        assert!(report.category_breakdown.is_none());
        assert_eq!(
            report.narrative(),
            vec!["Only one month of data available, no comparison possible."]
        );
    }

    #[test]
    fn refuses_empty_datasets() {
        assert!(matches!(
            build_report(&user(), &[], None),
            Err(ReportError::EmptyDataset)
        ));

        let unused = Category {
            id: 999,
            name: "Travel".to_string(),
            is_custom: true,
            created_by: Some(1),
        };
        assert!(matches!(
            build_report(&user(), &sample(), Some(&unused)),
            Err(ReportError::EmptyDataset)
        ));
    }

    #[test]
    fn capped_amounts_summarize_without_overflow() {
        let expenses: Vec<_> = (1..=4)
            .map(|i| expense(i, Some("Rent"), MAX_AMOUNT_CENTS, PaymentMode::Card, day(2025, 3, i as u32)))
            .collect();
        let report = build_report(&user(), &expenses, None).unwrap();

        assert_eq!(report.summary.total_cents, 4 * MAX_AMOUNT_CENTS);
        assert_eq!(report.summary.average_cents, MAX_AMOUNT_CENTS);
        assert_eq!(report.trend.months[0].total_cents, 4 * MAX_AMOUNT_CENTS);
    }
}
