use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration from the environment: {0}")]
    Env(#[from] envy::Error),

    #[error("environment variable {var} is empty")]
    Missing { var: &'static str },
}

/// Failure of a single page request against the builds endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("cannot construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid API base URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body did not match the expected build listing schema.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a month with builds still cannot be summarized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("no completed builds in {month}, every build was aborted")]
    NoCompletedBuilds { month: String },

    #[error("no active days in {month}")]
    NoActiveDays { month: String },
}
