//! Timeline endpoints.

use reqwest::Method;

use crate::api::auth::{Authentication, AuthenticationKind};
use crate::api::client::{check_max_results, TwitterApi};
use crate::api::routes::Route;
use crate::api::types::{
    join_fields, ApiPage, TimelineQuery, Tweet, TweetExpansion, TweetField, TweetIncludes,
    UserField,
};
use crate::error::{Error, Result};

/// Build the query items shared by every timeline endpoint.
fn timeline_params(query: &TimelineQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(max_results) = query.max_results {
        params.push(("max_results".to_string(), max_results.to_string()));
    }
    if let Some(token) = &query.pagination_token {
        params.push(("pagination_token".to_string(), token.clone()));
    }
    if let Some(since_id) = &query.since_id {
        params.push(("since_id".to_string(), since_id.clone()));
    }
    if let Some(until_id) = &query.until_id {
        params.push(("until_id".to_string(), until_id.clone()));
    }
    if !query.tweet_fields.is_empty() {
        params.push((
            "tweet.fields".to_string(),
            join_fields(&query.tweet_fields, TweetField::as_str),
        ));
    }
    if !query.user_fields.is_empty() {
        params.push((
            "user.fields".to_string(),
            join_fields(&query.user_fields, UserField::as_str),
        ));
    }
    if !query.expansions.is_empty() {
        params.push((
            "expansions".to_string(),
            join_fields(&query.expansions, TweetExpansion::as_str),
        ));
    }

    params
}

impl TwitterApi {
    async fn timeline(
        &self,
        route: Route,
        query: &TimelineQuery,
        min_results: u32,
    ) -> Result<ApiPage<Vec<Tweet>, TweetIncludes>> {
        if let Some(max_results) = query.max_results {
            check_max_results(max_results, min_results, 100)?;
        }

        let page: ApiPage<Vec<Tweet>, TweetIncludes> = self
            .call(Method::GET, &route, &timeline_params(query))
            .await?;

        tracing::debug!(
            "Fetched {} tweets from {}",
            page.data.as_ref().map_or(0, Vec::len),
            route.path()
        );
        Ok(page)
    }

    /// Tweets authored by `user_id`, newest first.
    ///
    /// Equivalent to `GET /2/users/:id/tweets`.
    pub async fn get_user_tweets(
        &self,
        user_id: &str,
        query: &TimelineQuery,
    ) -> Result<ApiPage<Vec<Tweet>, TweetIncludes>> {
        self.timeline(Route::UserTweets(user_id.to_string()), query, 5)
            .await
    }

    /// Tweets mentioning `user_id`.
    ///
    /// Equivalent to `GET /2/users/:id/mentions`.
    pub async fn get_user_mentions(
        &self,
        user_id: &str,
        query: &TimelineQuery,
    ) -> Result<ApiPage<Vec<Tweet>, TweetIncludes>> {
        self.timeline(Route::UserMentions(user_id.to_string()), query, 5)
            .await
    }

    /// Home timeline of the authenticated user.
    ///
    /// Equivalent to `GET /2/users/:id/timelines/reverse_chronological`.
    /// Only available with user access tokens.
    pub async fn get_reverse_chronological_timeline(
        &self,
        user_id: &str,
        query: &TimelineQuery,
    ) -> Result<ApiPage<Vec<Tweet>, TweetIncludes>> {
        if let Authentication::AppOnly { .. } = self.authentication() {
            return Err(Error::WrongAuthenticationType {
                needs: AuthenticationKind::UserAccessTokens,
            });
        }

        self.timeline(Route::ReverseChronological(user_id.to_string()), query, 1)
            .await
    }
}
