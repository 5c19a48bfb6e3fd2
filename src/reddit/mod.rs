//! Client for the upstream top-posts listing.

mod models;

pub use models::{
    absolute_permalink, truncate_chars, Listing, ListingChild, ListingData, Post,
    PostCollection, RawPost,
};

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::constants::{SUBREDDIT, USER_AGENT};

/// Failure talking to the upstream.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream returned status {status}")]
    Status { status: u16, body: String },
    #[error("upstream request timed out")]
    Timeout,
    #[error("{0}")]
    Request(#[source] reqwest::Error),
    #[error("unexpected listing payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

/// Upstream client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: Client,
    base_url: String,
}

impl RedditClient {
    /// Build a client with the configured timeout and the service user agent.
    /// Redirects are not followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(USER_AGENT)
            // One outbound call per request; a 3xx is passed through.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self {
            client,
            base_url: config.reddit_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Listing URL for `limit` posts. The value is embedded as given.
    #[must_use]
    pub fn top_url(&self, limit: i64) -> String {
        format!("{}/r/{SUBREDDIT}/top.json?limit={limit}", self.base_url)
    }

    /// Fetch the raw listing with a single GET.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] with the upstream body on a non-success
    /// status, [`FetchError::Timeout`] when the deadline passes, and
    /// [`FetchError::Decode`] when the body is not the expected listing.
    pub async fn fetch_top(&self, limit: i64) -> Result<Listing, FetchError> {
        let url = self.top_url(limit);
        debug!(url = %url, "Fetching top listing");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the listing and translate it into the output schema.
    ///
    /// # Errors
    ///
    /// See [`RedditClient::fetch_top`].
    pub async fn top_posts(&self, limit: i64) -> Result<PostCollection, FetchError> {
        let collection = PostCollection::from(self.fetch_top(limit).await?);
        debug!(limit, total_count = collection.total_count, "Translated top listing");
        Ok(collection)
    }
}
