use chrono::{DateTime, NaiveDate, Utc};

use crate::duration::BuildDuration;

pub mod analytics;
pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod window;

/// Outcome of a build, as reported by the `status` code of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "u8")]
pub enum BuildStatus {
    Ok,
    Error,
    Aborted,
    /// Still running (`0`) or any code the analytics do not know about.
    Other(u8),
}

impl From<u8> for BuildStatus {
    fn from(code: u8) -> Self {
        match code {
            1 => BuildStatus::Ok,
            2 => BuildStatus::Error,
            3 => BuildStatus::Aborted,
            code => BuildStatus::Other(code),
        }
    }
}

impl BuildStatus {
    /// OK and errored builds ran to completion and count toward build time.
    pub fn is_completed(self) -> bool {
        matches!(self, BuildStatus::Ok | BuildStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct BuildRecord {
    /// `None` while the build is queued.
    #[serde(rename = "started_on_worker_at")]
    pub started_at: Option<DateTime<Utc>>,
    /// `None` while the build is queued or running.
    pub finished_at: Option<DateTime<Utc>>,
    pub status: BuildStatus,
}

impl BuildRecord {
    pub fn duration(&self) -> Option<BuildDuration> {
        Some(BuildDuration::between(self.started_at?, self.finished_at?))
    }

    /// UTC calendar day on which the build started.
    pub fn start_day(&self) -> Option<NaiveDate> {
        self.started_at.map(|started_at| started_at.date_naive())
    }
}

/// Every build fetched for one date window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildHistory {
    pub builds: Vec<BuildRecord>,
    /// Item count reported by the last page of the listing.
    pub total_item_count: u64,
}

impl BuildHistory {
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}
