//! API request and response type definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response wrapper carrying only `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiData<T> {
    pub data: T,
}

/// Response wrapper for listings: `data` plus expansions and paging metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T, I> {
    /// Missing when a listing has no results.
    pub data: Option<T>,
    pub includes: Option<I>,
    pub meta: Option<Meta>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

/// Paging metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub result_count: Option<u32>,
    pub next_token: Option<String>,
    pub previous_token: Option<String>,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

/// Partial error reported alongside data.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub title: Option<String>,
    pub detail: Option<String>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub resource_id: Option<String>,
}

/// Problem document returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProblemResponse {
    pub title: Option<String>,
    pub detail: Option<String>,
}

/// A Twitter user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub pinned_tweet_id: Option<String>,
    pub profile_image_url: Option<String>,
    pub protected: Option<bool>,
    pub public_metrics: Option<UserPublicMetrics>,
    pub url: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserPublicMetrics {
    pub followers_count: u64,
    pub following_count: u64,
    pub tweet_count: u64,
    pub listed_count: u64,
}

/// A tweet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub conversation_id: Option<String>,
    pub in_reply_to_user_id: Option<String>,
    pub lang: Option<String>,
    pub possibly_sensitive: Option<bool>,
    pub public_metrics: Option<TweetPublicMetrics>,
    pub attachments: Option<TweetAttachments>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TweetPublicMetrics {
    pub retweet_count: u64,
    pub reply_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TweetAttachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

/// Expansions returned with user listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserIncludes {
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

/// Expansions returned with tweet listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetIncludes {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tweets: Vec<Tweet>,
}

/// Result of a mute or unmute call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MuteResponse {
    /// Whether the source user now mutes the target.
    pub muting: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct MuteRequest<'a> {
    pub target_user_id: &'a str,
}

/// Selectable `user.fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    CreatedAt,
    Description,
    Location,
    PinnedTweetId,
    ProfileImageUrl,
    Protected,
    PublicMetrics,
    Url,
    Verified,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::CreatedAt => "created_at",
            UserField::Description => "description",
            UserField::Location => "location",
            UserField::PinnedTweetId => "pinned_tweet_id",
            UserField::ProfileImageUrl => "profile_image_url",
            UserField::Protected => "protected",
            UserField::PublicMetrics => "public_metrics",
            UserField::Url => "url",
            UserField::Verified => "verified",
        }
    }
}

/// Selectable `tweet.fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweetField {
    Attachments,
    AuthorId,
    ConversationId,
    CreatedAt,
    InReplyToUserId,
    Lang,
    PossiblySensitive,
    PublicMetrics,
}

impl TweetField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweetField::Attachments => "attachments",
            TweetField::AuthorId => "author_id",
            TweetField::ConversationId => "conversation_id",
            TweetField::CreatedAt => "created_at",
            TweetField::InReplyToUserId => "in_reply_to_user_id",
            TweetField::Lang => "lang",
            TweetField::PossiblySensitive => "possibly_sensitive",
            TweetField::PublicMetrics => "public_metrics",
        }
    }
}

/// Selectable tweet `expansions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweetExpansion {
    AuthorId,
    InReplyToUserId,
    ReferencedTweetsId,
    AttachmentsMediaKeys,
}

impl TweetExpansion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweetExpansion::AuthorId => "author_id",
            TweetExpansion::InReplyToUserId => "in_reply_to_user_id",
            TweetExpansion::ReferencedTweetsId => "referenced_tweets.id",
            TweetExpansion::AttachmentsMediaKeys => "attachments.media_keys",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TweetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join field names into the comma-separated form the API expects.
pub(crate) fn join_fields<T, F>(fields: &[T], name: F) -> String
where
    F: Fn(&T) -> &'static str,
{
    fields.iter().map(name).collect::<Vec<_>>().join(",")
}

/// Query options for user listings.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub user_fields: Vec<UserField>,
    /// Fields of the expanded pinned tweet; non-empty adds `expansions=pinned_tweet_id`.
    pub tweet_fields: Vec<TweetField>,
    pub max_results: u32,
    pub pagination_token: Option<String>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            user_fields: Vec::new(),
            tweet_fields: Vec::new(),
            max_results: 100,
            pagination_token: None,
        }
    }
}

/// Query options for tweet timelines.
#[derive(Debug, Clone, Default)]
pub struct TimelineQuery {
    pub tweet_fields: Vec<TweetField>,
    pub user_fields: Vec<UserField>,
    pub expansions: Vec<TweetExpansion>,
    /// Server default when unset.
    pub max_results: Option<u32>,
    pub pagination_token: Option<String>,
    pub since_id: Option<String>,
    pub until_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_page_deserialization() {
        let json = r#"{
            "data": [
                {"id": "1", "name": "One", "username": "one", "pinned_tweet_id": "99"},
                {"id": "2", "name": "Two", "username": "two", "created_at": "2021-05-01T10:00:00.000Z"}
            ],
            "includes": {"tweets": [{"id": "99", "text": "pinned"}]},
            "meta": {"result_count": 2, "next_token": "abc"}
        }"#;

        let page: ApiPage<Vec<User>, UserIncludes> = serde_json::from_str(json).unwrap();
        let users = page.data.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].pinned_tweet_id.as_deref(), Some("99"));
        assert!(users[1].created_at.is_some());
        assert_eq!(page.includes.unwrap().tweets[0].text, "pinned");
        assert_eq!(page.meta.unwrap().next_token.as_deref(), Some("abc"));
        assert!(page.errors.is_empty());
    }

    #[test]
    fn test_empty_page_has_no_data() {
        let json = r#"{"meta": {"result_count": 0}}"#;
        let page: ApiPage<Vec<Tweet>, TweetIncludes> = serde_json::from_str(json).unwrap();
        assert!(page.data.is_none());
        assert_eq!(page.meta.unwrap().result_count, Some(0));
    }

    #[test]
    fn test_mute_response() {
        let json = r#"{"data": {"muting": true}}"#;
        let response: ApiData<MuteResponse> = serde_json::from_str(json).unwrap();
        assert!(response.data.muting);
    }

    #[test]
    fn test_join_fields() {
        let fields = [UserField::CreatedAt, UserField::PublicMetrics];
        assert_eq!(
            join_fields(&fields, UserField::as_str),
            "created_at,public_metrics"
        );
        assert_eq!(join_fields::<UserField, _>(&[], UserField::as_str), "");
    }

    #[test]
    fn test_tweet_metrics() {
        let json = r#"{
            "id": "5", "text": "hi",
            "public_metrics": {"retweet_count": 1, "reply_count": 2, "like_count": 3, "quote_count": 4}
        }"#;
        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.public_metrics.unwrap().like_count, 3);
    }
}
