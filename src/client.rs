use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Url;

use crate::config::Config;
use crate::error::ApiError;
use crate::window::DateWindow;
use crate::{BuildHistory, BuildRecord};

pub const DEFAULT_BASE_URL: &str = "https://api.bitrise.io/v0.1";
const PAGE_ITEM_LIMIT: u32 = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Opaque token of the next page; empty means there are no more pages.
pub type PageCursor = String;

/// Anything that can return one page of builds for a window.
#[allow(async_fn_in_trait)]
pub trait BuildSource {
    async fn fetch_page(&self, window: &DateWindow, cursor: &str) -> Result<BuildPage, ApiError>;
}

pub struct BitriseApi {
    client: reqwest::Client,
    base_url: Url,
    config: Config,
}

impl BitriseApi {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: Config, base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            config,
        })
    }

    /// Downloads every build of the app that falls into `window`.
    pub async fn get_builds(&self, window: &DateWindow) -> Result<BuildHistory, ApiError> {
        get_builds(self, window).await
    }

    fn builds_url(&self, window: &DateWindow, cursor: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["apps", self.config.app_slug.as_str(), "builds"]);
        }
        url.query_pairs_mut()
            .append_pair("before", &window.before.timestamp().to_string())
            .append_pair("after", &window.after.timestamp().to_string())
            .append_pair("limit", &PAGE_ITEM_LIMIT.to_string())
            .append_pair("next", cursor);
        url
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::BaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|error| invalid(error.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical URL".to_string()));
    }
    Ok(url)
}

impl BuildSource for BitriseApi {
    async fn fetch_page(&self, window: &DateWindow, cursor: &str) -> Result<BuildPage, ApiError> {
        let url = self.builds_url(window, cursor);
        let url_text = url.to_string();
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.config.access_token)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url_text.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url_text,
                status,
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url_text.clone(),
            source,
        })?;
        parse_page(&body).map_err(|source| ApiError::Decode {
            url: url_text,
            source,
        })
    }
}

/// Follows `paging.next` until the listing is exhausted.
///
/// A page without any builds voids the whole window: whatever was
/// accumulated from earlier pages is dropped and an empty history is
/// returned. An empty cursor ends the listing and keeps everything.
pub async fn get_builds<S: BuildSource>(
    source: &S,
    window: &DateWindow,
) -> Result<BuildHistory, ApiError> {
    let mut history = BuildHistory::default();
    let mut cursor = PageCursor::new();

    loop {
        let page = source.fetch_page(window, &cursor).await?;
        log::debug!(
            "Fetched page (cursor {cursor:?}) with {} builds, next {:?}",
            page.data.len(),
            page.paging.next
        );
        if page.data.is_empty() {
            return Ok(BuildHistory::default());
        }

        history.builds.extend(page.data);
        history.total_item_count = page.paging.total_item_count;

        match page.paging.next {
            Some(next) if !next.is_empty() => cursor = next,
            _ => break,
        }
    }
    Ok(history)
}

fn parse_page(body: &str) -> Result<BuildPage, serde_json::Error> {
    serde_json::from_str(body)
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildPage {
    pub data: Vec<BuildRecord>,
    pub paging: Paging,
}

#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    pub total_item_count: u64,
    pub page_item_limit: u32,
    #[serde(default)]
    pub next: Option<PageCursor>,
}
