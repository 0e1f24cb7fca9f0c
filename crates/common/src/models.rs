use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

use crate::config::TableConfig;

/// A community post as read from the posts table. Every field but the id is
/// nullable in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    #[serde(rename = "content", default)]
    pub body: Option<String>,
    #[serde(
        default,
        serialize_with = "time::serde::rfc3339::option::serialize",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(rename = "likes_count", default)]
    pub like_count: Option<i64>,
    #[serde(rename = "comments_count", default)]
    pub comment_count: Option<i64>,
}

impl PostRecord {
    pub fn new(id: impl Into<String>, body: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            body: Some(body.into()),
            created_at: Some(created_at),
            like_count: None,
            comment_count: None,
        }
    }

    pub fn with_counts(mut self, likes: i64, comments: i64) -> Self {
        self.like_count = Some(likes);
        self.comment_count = Some(comments);
        self
    }
}

/// Accepts RFC 3339 and offset-less timestamps (read as UTC), as returned for
/// `timestamptz` and `timestamp` columns. Anything else becomes `None` so a
/// single bad row does not fail the whole page.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let normalized = raw.replacen(' ', "T", 1);
    let fractional = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    let whole = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    match PrimitiveDateTime::parse(&normalized, fractional)
        .or_else(|_| PrimitiveDateTime::parse(&normalized, whole))
    {
        Ok(parsed) => Some(parsed.assume_utc()),
        Err(e) => {
            debug!("Ignoring unparseable timestamp '{}': {}", raw, e);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub id: String,
    #[serde(default)]
    pub listing_id: Option<String>,
    pub status: BoostStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Favorite,
}

impl ReactionKind {
    pub fn table<'a>(&self, tables: &'a TableConfig) -> &'a str {
        match self {
            ReactionKind::Like => &tables.post_likes,
            ReactionKind::Favorite => &tables.listing_favorites,
        }
    }

    /// Column holding the id of the liked post or favorited listing.
    pub fn target_column(&self) -> &'static str {
        match self {
            ReactionKind::Like => "post_id",
            ReactionKind::Favorite => "listing_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Option<String>,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_post_record_decodes_nullable_columns() {
        let json = r#"[
            {"id":"a","content":"Hello #EV","created_at":"2026-10-19T08:30:00+00:00","likes_count":3,"comments_count":null},
            {"id":"b","content":null}
        ]"#;
        let posts: Vec<PostRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(posts[0].body.as_deref(), Some("Hello #EV"));
        assert_eq!(posts[0].like_count, Some(3));
        assert_eq!(posts[0].comment_count, None);
        assert!(posts[0].created_at.is_some());
        assert_eq!(posts[1].body, None);
        assert_eq!(posts[1].created_at, None);
    }

    #[test]
    fn test_bad_timestamp_only_drops_that_row() {
        let json = r##"[
            {"id":"good","content":"#ev","created_at":"2026-10-19T08:30:00+00:00"},
            {"id":"naive","content":"#ev","created_at":"2026-10-19T08:30:00.123456"},
            {"id":"garbage","content":"#ev","created_at":"yesterday-ish"},
            {"id":"number","content":"#ev","created_at":1760862600}
        ]"##;
        let posts: Vec<PostRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].created_at, Some(datetime!(2026-10-19 08:30 UTC)));
        assert_eq!(
            posts[1].created_at,
            Some(datetime!(2026-10-19 08:30:00.123456 UTC))
        );
        assert_eq!(posts[2].created_at, None);
        assert_eq!(posts[3].created_at, None);
    }

    #[test]
    fn test_parse_timestamp_accepts_space_separator() {
        assert_eq!(
            parse_timestamp("2026-10-19 08:30:00"),
            Some(datetime!(2026-10-19 08:30 UTC))
        );
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_post_record_serializes_rfc3339() {
        let post = PostRecord::new("p", "#ev", datetime!(2026-10-19 08:30 UTC));
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["created_at"], "2026-10-19T08:30:00Z");
    }

    #[test]
    fn test_boost_status_tolerates_unknown_values() {
        let json = r#"{"id":"x","status":"paused","ends_at":"2026-10-19T00:00:00Z"}"#;
        let boost: Boost = serde_json::from_str(json).unwrap();
        assert_eq!(boost.status, BoostStatus::Unknown);
        assert_eq!(boost.listing_id, None);
    }
}
