//! Shared constants used across the application.

/// Community whose top listing is proxied.
pub const SUBREDDIT: &str = "devops";

/// Default upstream origin for JSON listing requests.
pub const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Origin prepended to the relative permalinks returned by the upstream.
pub const PERMALINK_ORIGIN: &str = "https://reddit.com";

/// Default ceiling on the outbound request, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Largest `limit` a caller may request.
pub const MAX_LIMIT: i64 = 25;

/// `limit` used when the caller does not pass one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of characters kept from a post body.
pub const SELFTEXT_MAX_CHARS: usize = 500;

/// User agent sent upstream. The upstream rejects requests without one.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
