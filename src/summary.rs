//! Totals and breakdowns over a set of expenses.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Expense, PaymentMode};
use crate::period::{buckets, Period};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// `None` collects expenses without a category.
    pub category_name: Option<String>,
    pub total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentModeTotal {
    pub mode: PaymentMode,
    pub total_cents: i64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_cents: i64,
    pub by_category: Vec<CategoryTotal>,
    pub by_payment_mode: Vec<PaymentModeTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    pub period: Period,
    pub summary: Summary,
}

/// Named categories ascending, uncategorized last.
fn cmp_category_names(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn summarize<'a, I>(expenses: I) -> Summary
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut total_cents: i64 = 0;
    let mut by_category: HashMap<Option<&str>, i64> = HashMap::new();
    let mut by_mode: HashMap<PaymentMode, (i64, usize)> = HashMap::new();

    for expense in expenses {
        total_cents = total_cents.saturating_add(expense.amount_cents);
        let category_total = by_category
            .entry(expense.category_name.as_deref())
            .or_insert(0);
        *category_total = category_total.saturating_add(expense.amount_cents);
        let entry = by_mode.entry(expense.payment_mode).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(expense.amount_cents);
        entry.1 += 1;
    }

    let mut by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(name, total_cents)| CategoryTotal {
            category_name: name.map(str::to_string),
            total_cents,
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.total_cents
            .cmp(&a.total_cents)
            .then_with(|| cmp_category_names(&a.category_name, &b.category_name))
    });

    let mut by_payment_mode: Vec<PaymentModeTotal> = by_mode
        .into_iter()
        .map(|(mode, (total_cents, count))| PaymentModeTotal {
            mode,
            total_cents,
            count,
        })
        .collect();
    by_payment_mode.sort_by(|a, b| b.total_cents.cmp(&a.total_cents).then(a.mode.cmp(&b.mode)));

    Summary {
        total_cents,
        by_category,
        by_payment_mode,
    }
}

/// One [`Summary`] per period, from today out to overall.
pub fn summarize_periods(expenses: &[Expense], today: NaiveDate) -> Vec<PeriodSummary> {
    buckets(today)
        .into_iter()
        .map(|bucket| PeriodSummary {
            period: bucket.period,
            summary: summarize(
                expenses
                    .iter()
                    .filter(|expense| bucket.contains(expense.expense_date)),
            ),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::money::MAX_AMOUNT_CENTS;
    use chrono::{TimeZone, Utc};

    pub(crate) fn expense(
        id: i64,
        category: Option<&str>,
        cents: i64,
        mode: PaymentMode,
        date: NaiveDate,
    ) -> Expense {
        Expense {
            id,
            user_id: 1,
            category_id: category.map(|_| id * 10),
            category_name: category.map(str::to_string),
            title: format!("expense {id}"),
            amount_cents: cents,
            expense_date: date,
            payment_mode: mode,
            note: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_sums_to_zero() {
        let summary = summarize(std::iter::empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn groups_categories_and_payment_modes() {
        let today = day(2025, 6, 11);
        let expenses = vec![
            expense(1, Some("FOOD"), 5000, PaymentMode::Cash, today),
            expense(2, Some("TRANSPORT"), 2000, PaymentMode::Upi, today),
            expense(3, Some("FOOD"), 3000, PaymentMode::Cash, today),
        ];

        let periods = summarize_periods(&expenses, today);
        let today_summary = &periods[0].summary;
        assert_eq!(periods[0].period, Period::Today);
        assert_eq!(today_summary.total_cents, 10_000);
        assert_eq!(
            today_summary.by_category,
            vec![
                CategoryTotal {
                    category_name: Some("FOOD".into()),
                    total_cents: 8000
                },
                CategoryTotal {
                    category_name: Some("TRANSPORT".into()),
                    total_cents: 2000
                },
            ]
        );
        assert_eq!(
            today_summary.by_payment_mode,
            vec![
                PaymentModeTotal {
                    mode: PaymentMode::Cash,
                    total_cents: 8000,
                    count: 2
                },
                PaymentModeTotal {
                    mode: PaymentMode::Upi,
                    total_cents: 2000,
                    count: 1
                },
            ]
        );
        assert_eq!(periods[1].summary, Summary::default());
    }

    #[test]
    fn uncategorized_expenses_keep_their_own_bucket() {
        let d = day(2025, 2, 2);
        let expenses = vec![
            expense(1, None, 700, PaymentMode::Card, d),
            expense(2, Some("Rent"), 700, PaymentMode::Card, d),
            expense(3, Some("Books"), 700, PaymentMode::Wallet, d),
            expense(4, None, 100, PaymentMode::Other, d),
        ];

        let names: Vec<_> = summarize(&expenses)
            .by_category
            .into_iter()
            .map(|c| (c.category_name, c.total_cents))
            .collect();
        assert_eq!(
            names,
            vec![
                (None, 800),
                (Some("Books".to_string()), 700),
                (Some("Rent".to_string()), 700),
            ]
        );
    }

    #[test]
    fn breakdowns_add_up_to_total() {
        let d = day(2024, 11, 30);
        let modes = [
            PaymentMode::Cash,
            PaymentMode::Card,
            PaymentMode::Upi,
            PaymentMode::BankTransfer,
            PaymentMode::Wallet,
        ];
        let categories = [Some("A"), Some("B"), None];
        let expenses: Vec<_> = (0..40)
            .map(|i| {
                expense(
                    i,
                    categories[i as usize % categories.len()],
                    (i * 137) % 5000,
                    modes[i as usize % modes.len()],
                    d,
                )
            })
            .collect();

        let summary = summarize(&expenses);
        let by_category: i64 = summary.by_category.iter().map(|c| c.total_cents).sum();
        let by_mode: i64 = summary.by_payment_mode.iter().map(|m| m.total_cents).sum();
        let count: usize = summary.by_payment_mode.iter().map(|m| m.count).sum();
        assert_eq!(by_category, summary.total_cents);
        assert_eq!(by_mode, summary.total_cents);
        assert_eq!(count, expenses.len());
    }

    #[test]
    fn totals_at_the_amount_cap_do_not_overflow() {
        let d = day(2025, 1, 1);
        let expenses: Vec<_> = (1..=3)
            .map(|i| expense(i, Some("Rent"), MAX_AMOUNT_CENTS, PaymentMode::BankTransfer, d))
            .collect();

        let summary = summarize(&expenses);
        assert_eq!(summary.total_cents, 3 * MAX_AMOUNT_CENTS);
        assert_eq!(summary.by_category[0].total_cents, 3 * MAX_AMOUNT_CENTS);

        let extreme = vec![
            expense(1, None, i64::MAX, PaymentMode::Cash, d),
            expense(2, None, i64::MAX, PaymentMode::Cash, d),
        ];
        assert_eq!(summarize(&extreme).total_cents, i64::MAX);
    }
}
