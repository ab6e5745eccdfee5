use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;

/// Build time in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuildDuration(pub i64);

impl BuildDuration {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self((end - start).num_milliseconds())
    }

    pub fn from_secs(secs: i64) -> Self {
        Self(secs * 1000)
    }

    /// Integer division by a count, truncating toward zero.
    /// Returns `None` when `count` is zero.
    pub fn checked_div(self, count: u64) -> Option<Self> {
        let count = i64::try_from(count).ok()?;
        self.0.checked_div(count).map(Self)
    }
}

impl Add for BuildDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for BuildDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|v| v.0).sum::<i64>())
    }
}

/// Formats as e.g. `1h30m0s`, `45m0s`, `2.5s` or `0s`.
impl Display for BuildDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let millis = self.0.unsigned_abs();
        let hours = millis / 3_600_000;
        let minutes = millis / 60_000 % 60;
        let seconds = millis / 1000 % 60;
        let fraction = millis % 1000;

        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{seconds}")?;
        if fraction > 0 {
            let fraction = format!("{fraction:03}");
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        f.write_str("s")
    }
}

#[cfg(test)]
mod tests {
    use super::BuildDuration;

    #[test]
    fn display_matches_hour_minute_second_layout() {
        assert_eq!(BuildDuration::from_secs(5400).to_string(), "1h30m0s");
        assert_eq!(BuildDuration::from_secs(2700).to_string(), "45m0s");
        assert_eq!(BuildDuration::from_secs(3601).to_string(), "1h0m1s");
        assert_eq!(BuildDuration(2500).to_string(), "2.5s");
        assert_eq!(BuildDuration(20).to_string(), "0.02s");
        assert_eq!(BuildDuration(0).to_string(), "0s");
        assert_eq!(BuildDuration::from_secs(-90).to_string(), "-1m30s");
    }

    #[test]
    fn checked_div_truncates_and_rejects_zero() {
        assert_eq!(
            BuildDuration::from_secs(5400).checked_div(2),
            Some(BuildDuration::from_secs(2700))
        );
        assert_eq!(BuildDuration(10).checked_div(3), Some(BuildDuration(3)));
        assert_eq!(BuildDuration(10).checked_div(0), None);
    }

    #[test]
    fn sums_durations() {
        let total: BuildDuration = [BuildDuration(1), BuildDuration(2), BuildDuration(3)]
            .into_iter()
            .sum();
        assert_eq!(total, BuildDuration(6));
    }
}
