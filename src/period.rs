//! Date windows the summary endpoint aggregates over.

use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Yesterday,
    Weekly,
    Monthly,
    Yearly,
    Overall,
}

impl Period {
    pub fn key(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
            Period::Overall => "overall",
        }
    }
}

/// Inclusive date range. `None` bounds are open, so `Overall` matches every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub period: Period,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Bucket {
    fn closed(period: Period, start: NaiveDate, end: NaiveDate) -> Self {
        Bucket {
            period,
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub fn buckets(today: NaiveDate) -> [Bucket; 6] {
    let yesterday = today.pred_opt().unwrap_or(today);
    let month_start = today.with_day(1).unwrap_or(today);
    let year_start = today.with_ordinal(1).unwrap_or(today);

    [
        Bucket::closed(Period::Today, today, today),
        Bucket::closed(Period::Yesterday, yesterday, yesterday),
        Bucket::closed(Period::Weekly, start_of_week(today), today),
        Bucket::closed(Period::Monthly, month_start, today),
        Bucket::closed(Period::Yearly, year_start, today),
        Bucket {
            period: Period::Overall,
            start: None,
            end: None,
        },
    ]
}
