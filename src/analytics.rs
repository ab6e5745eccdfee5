use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::duration::BuildDuration;
use crate::error::SummaryError;
use crate::window::month_start;
use crate::{BuildHistory, BuildRecord, BuildStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    /// First day of the month the report covers.
    pub report_month: NaiveDate,
    pub total_count: u64,
    pub ok_count: u64,
    pub error_count: u64,
    pub aborted_count: u64,
    /// Summed duration of OK and errored builds.
    pub total_duration: BuildDuration,
    /// Days on which at least one OK or errored build started.
    pub active_days: u64,
    pub average_duration_per_build: BuildDuration,
    pub average_builds_per_day: u64,
    pub average_duration_per_day: BuildDuration,
}

impl MonthlyReport {
    pub fn month_label(&self) -> String {
        month_label(self.report_month)
    }
}

fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Reduces the builds of one month into a report.
///
/// Returns `Ok(None)` when there is nothing to report. The month is taken
/// from the first build that started, so the history is expected to cover
/// one month only. Builds that are still running or carry an unknown status
/// only show up in `total_count`.
pub fn summarize(history: &BuildHistory) -> Result<Option<MonthlyReport>, SummaryError> {
    let Some(first_day) = history.builds.iter().find_map(BuildRecord::start_day) else {
        return Ok(None);
    };
    let report_month = month_start(first_day);

    let mut ok_count = 0u64;
    let mut error_count = 0u64;
    let mut aborted_count = 0u64;
    let mut active_days = 0u64;
    let mut last_active_day: Option<NaiveDate> = None;

    for build in &history.builds {
        match build.status {
            BuildStatus::Ok => ok_count += 1,
            BuildStatus::Error => error_count += 1,
            BuildStatus::Aborted => {
                aborted_count += 1;
                continue;
            }
            BuildStatus::Other(code) => {
                log::debug!("Ignoring build with status {code}");
                continue;
            }
        }

        // Builds arrive grouped by day, so only a change of day counts.
        let day = build.start_day();
        if day.is_some() && day != last_active_day {
            active_days += 1;
            last_active_day = day;
        }
    }

    let total_duration: BuildDuration = history
        .builds
        .iter()
        .filter(|build| build.status.is_completed())
        .filter_map(BuildRecord::duration)
        .sum();

    let average_duration_per_build = total_duration
        .checked_div(ok_count + error_count)
        .ok_or_else(|| SummaryError::NoCompletedBuilds {
            month: month_label(report_month),
        })?;
    let no_active_days = || SummaryError::NoActiveDays {
        month: month_label(report_month),
    };
    let average_builds_per_day = history
        .total_item_count
        .checked_div(active_days)
        .ok_or_else(no_active_days)?;
    let average_duration_per_day = total_duration
        .checked_div(active_days)
        .ok_or_else(no_active_days)?;

    Ok(Some(MonthlyReport {
        report_month,
        total_count: history.total_item_count,
        ok_count,
        error_count,
        aborted_count,
        total_duration,
        active_days,
        average_duration_per_build,
        average_builds_per_day,
        average_duration_per_day,
    }))
}

impl Display for MonthlyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let separator = format!("--------- analytics: {} ---------", self.month_label());
        writeln!(f, "{separator}")?;
        writeln!(f, "Builds (total): {}", self.total_count)?;
        writeln!(f, "  > OK: {}", self.ok_count)?;
        writeln!(f, "  > Error: {}", self.error_count)?;
        writeln!(f, "  > Aborted: {}", self.aborted_count)?;
        writeln!(f, "Total build time: {}", self.total_duration)?;
        writeln!(
            f,
            "Average time per build: {}",
            self.average_duration_per_build
        )?;
        writeln!(f)?;
        writeln!(f, "Average builds per day: {}", self.average_builds_per_day)?;
        writeln!(
            f,
            "Average build time per day: {}",
            self.average_duration_per_day
        )?;
        writeln!(f, "{separator}")
    }
}
