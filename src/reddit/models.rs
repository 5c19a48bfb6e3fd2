use serde::{Deserialize, Serialize};

use crate::constants::{PERMALINK_ORIGIN, SELFTEXT_MAX_CHARS};

/// Top-level listing envelope returned by the upstream `top.json` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub data: RawPost,
}

/// The subset of upstream post fields this service reads.
///
/// Every field except `selftext` is required; a missing one fails the whole
/// listing rather than producing a partial result.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
    pub created_utc: f64,
    /// Path relative to the site origin, e.g. `/r/devops/comments/abc/x/`.
    pub permalink: String,
    #[serde(default)]
    pub selftext: Option<String>,
}

/// A post in the stable output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub num_comments: i64,
    pub url: String,
    pub created_utc: f64,
    pub permalink: String,
    pub selftext: Option<String>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        Self {
            title: raw.title,
            author: raw.author,
            score: raw.score,
            num_comments: raw.num_comments,
            url: raw.url,
            created_utc: raw.created_utc,
            permalink: absolute_permalink(&raw.permalink),
            selftext: raw
                .selftext
                .filter(|text| !text.is_empty())
                .map(|text| truncate_chars(&text, SELFTEXT_MAX_CHARS)),
        }
    }
}

/// Posts in upstream ranking order plus their count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCollection {
    pub posts: Vec<Post>,
    pub total_count: usize,
}

impl PostCollection {
    #[must_use]
    pub fn new(posts: Vec<Post>) -> Self {
        let total_count = posts.len();
        Self { posts, total_count }
    }
}

impl From<Listing> for PostCollection {
    fn from(listing: Listing) -> Self {
        Self::new(
            listing
                .data
                .children
                .into_iter()
                .map(|child| Post::from(child.data))
                .collect(),
        )
    }
}

/// Prefix a relative upstream permalink with the public origin.
#[must_use]
pub fn absolute_permalink(relative: &str) -> String {
    format!("{PERMALINK_ORIGIN}{relative}")
}

/// Keep at most `max_chars` characters (not bytes) of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_post(selftext: Option<&str>) -> RawPost {
        RawPost {
            title: "Terraform state horror stories".to_string(),
            author: "opsperson".to_string(),
            score: 321,
            num_comments: 45,
            url: "https://example.com/article".to_string(),
            created_utc: 1_700_000_000.0,
            permalink: "/r/devops/comments/abc123/terraform_state/".to_string(),
            selftext: selftext.map(str::to_string),
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("", 3), "");
        // Multi-byte characters count once each
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_post_maps_fields() {
        let post = Post::from(raw_post(Some("body")));

        assert_eq!(post.title, "Terraform state horror stories");
        assert_eq!(post.author, "opsperson");
        assert_eq!(post.score, 321);
        assert_eq!(post.num_comments, 45);
        assert_eq!(post.url, "https://example.com/article");
        assert!((post.created_utc - 1_700_000_000.0).abs() < f64::EPSILON);
        assert_eq!(
            post.permalink,
            "https://reddit.com/r/devops/comments/abc123/terraform_state/"
        );
        assert_eq!(post.selftext.as_deref(), Some("body"));
    }

    #[test]
    fn test_selftext_truncated_to_limit() {
        let long = "x".repeat(600);
        let post = Post::from(raw_post(Some(long.as_str())));

        let selftext = post.selftext.unwrap();
        assert_eq!(selftext.chars().count(), 500);
        assert!(long.starts_with(&selftext));
    }

    #[test]
    fn test_empty_or_missing_selftext_is_none() {
        assert!(Post::from(raw_post(None)).selftext.is_none());
        assert!(Post::from(raw_post(Some(""))).selftext.is_none());
    }

    #[test]
    fn test_selftext_serializes_as_null() {
        let post = Post::from(raw_post(None));
        let json = serde_json::to_value(&post).unwrap();

        assert!(json["selftext"].is_null());
    }

    #[test]
    fn test_collection_preserves_order_and_counts() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "kind": "Listing",
            "data": {
                "after": "t3_zzz",
                "children": [
                    {"kind": "t3", "data": {
                        "title": "first", "author": "a", "score": 10, "num_comments": 1,
                        "url": "https://a.example", "created_utc": 1700000001,
                        "permalink": "/r/devops/comments/1/first/", "selftext": ""
                    }},
                    {"kind": "t3", "data": {
                        "title": "second", "author": "b", "score": 5, "num_comments": 2,
                        "url": "https://b.example", "created_utc": 1700000002.5,
                        "permalink": "/r/devops/comments/2/second/"
                    }}
                ]
            }
        }))
        .unwrap();

        let collection = PostCollection::from(listing);

        assert_eq!(collection.total_count, 2);
        assert_eq!(collection.posts[0].title, "first");
        assert_eq!(collection.posts[1].title, "second");
        assert!(collection.posts.iter().all(|p| p.selftext.is_none()));
    }

    #[test]
    fn test_listing_without_children_fails_to_parse() {
        let result: Result<Listing, _> =
            serde_json::from_value(serde_json::json!({"data": {"after": null}}));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("children"), "unexpected error: {err}");
    }
}
