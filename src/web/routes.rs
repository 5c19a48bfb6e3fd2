use std::num::IntErrorKind;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::constants::{DEFAULT_LIMIT, MAX_LIMIT, SUBREDDIT};
use crate::reddit::PostCollection;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/devops/top", get(devops_top))
}

async fn root() -> Json<Value> {
    Json(json!({
        "title": "DevOps Reddit API",
        "description": format!("Fetches top posts from r/{SUBREDDIT}"),
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Welcome to the DevOps Reddit API",
        "endpoints": {
            "/devops/top": format!("Get top {DEFAULT_LIMIT} posts from r/{SUBREDDIT} (limit up to {MAX_LIMIT})"),
        }
    }))
}

#[derive(Debug, Deserialize)]
struct TopParams {
    limit: Option<String>,
}

async fn devops_top(
    State(state): State<AppState>,
    params: Result<Query<TopParams>, QueryRejection>,
) -> Result<Json<PostCollection>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let limit = match params.limit.as_deref() {
        Some(raw) => parse_limit(raw)?,
        None => DEFAULT_LIMIT,
    };
    let limit = check_limit(limit)?;

    let posts = state.reddit.top_posts(limit).await?;
    Ok(Json(posts))
}

/// Parse a raw `limit` query value.
///
/// A positive integer too large for `i64` is still over [`MAX_LIMIT`] and is
/// reported as such; anything that is not an integer is an invalid query.
pub fn parse_limit(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(limit) => Ok(limit),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            Err(ApiError::LimitExceeded { max: MAX_LIMIT })
        }
        Err(e) => Err(ApiError::InvalidQuery(format!(
            "limit must be an integer, got '{raw}': {e}"
        ))),
    }
}

/// Reject limits above [`MAX_LIMIT`]. Zero and negative values pass through.
pub fn check_limit(limit: i64) -> Result<i64, ApiError> {
    if limit > MAX_LIMIT {
        return Err(ApiError::LimitExceeded { max: MAX_LIMIT });
    }
    Ok(limit)
}
