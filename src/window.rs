use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

/// A calendar month in UTC, bounded inclusively on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First instant of the month (00:00:00 on day 1).
    pub after: DateTime<Utc>,
    /// Last second of the month (23:59:59 on the last day).
    pub before: DateTime<Utc>,
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.day0()))
}

impl DateWindow {
    /// The month starting on `first_day`.
    fn starting_at(first_day: NaiveDate) -> Self {
        // No month is longer than 31 days.
        let next_month = month_start(first_day + TimeDelta::days(31));
        let after = Utc.from_utc_datetime(&first_day.and_time(NaiveTime::MIN));
        let before = Utc.from_utc_datetime(&next_month.and_time(NaiveTime::MIN))
            - TimeDelta::seconds(1);
        Self { after, before }
    }

    /// Windows for the month containing `now` and the two months before it,
    /// most recent first.
    pub fn last_three_months(now: DateTime<Utc>) -> [DateWindow; 3] {
        let this_month = month_start(now.date_naive());
        let last_month = month_start(this_month - TimeDelta::days(1));
        let month_before_last = month_start(last_month - TimeDelta::days(1));
        [
            Self::starting_at(this_month),
            Self::starting_at(last_month),
            Self::starting_at(month_before_last),
        ]
    }
}
