//! Mute endpoints.

use reqwest::Method;

use crate::api::client::{check_max_results, TwitterApi};
use crate::api::routes::Route;
use crate::api::types::{
    join_fields, ApiData, ApiPage, MuteRequest, MuteResponse, TweetField, User, UserField,
    UserIncludes, UserQuery,
};
use crate::config::validate_user_id;
use crate::error::Result;

impl TwitterApi {
    /// List the users muted by `user_id`.
    ///
    /// Equivalent to `GET /2/users/:id/muting`. `max_results` must be within
    /// 1..=1000. Selecting tweet fields expands the pinned tweet of each user
    /// into `includes`.
    pub async fn get_muted_users(
        &self,
        user_id: &str,
        query: &UserQuery,
    ) -> Result<ApiPage<Vec<User>, UserIncludes>> {
        check_max_results(query.max_results, 1, 1000)?;

        let mut params = vec![("max_results".to_string(), query.max_results.to_string())];
        if let Some(token) = &query.pagination_token {
            params.push(("pagination_token".to_string(), token.clone()));
        }
        if !query.user_fields.is_empty() {
            params.push((
                "user.fields".to_string(),
                join_fields(&query.user_fields, UserField::as_str),
            ));
        }
        if !query.tweet_fields.is_empty() {
            params.push((
                "tweet.fields".to_string(),
                join_fields(&query.tweet_fields, TweetField::as_str),
            ));
            params.push(("expansions".to_string(), "pinned_tweet_id".to_string()));
        }

        let page: ApiPage<Vec<User>, UserIncludes> = self
            .call(Method::GET, &Route::Muting(user_id.to_string()), &params)
            .await?;

        tracing::debug!(
            "Fetched {} muted users for {}",
            page.data.as_ref().map_or(0, Vec::len),
            user_id
        );
        Ok(page)
    }

    /// Make `source_user_id` mute `target_user_id`.
    ///
    /// Equivalent to `POST /2/users/:id/muting`. The source must be the
    /// authenticated user.
    pub async fn mute_user(
        &self,
        source_user_id: &str,
        target_user_id: &str,
    ) -> Result<ApiData<MuteResponse>> {
        validate_user_id(target_user_id)?;

        let body = MuteRequest { target_user_id };
        let response: ApiData<MuteResponse> = self
            .call_with_body(Method::POST, &Route::Muting(source_user_id.to_string()), &body)
            .await?;

        tracing::info!("{} muted {}", source_user_id, target_user_id);
        Ok(response)
    }

    /// Make `source_user_id` unmute `target_user_id`.
    ///
    /// Equivalent to `DELETE /2/users/:source_user_id/muting/:target_user_id`.
    pub async fn unmute_user(
        &self,
        source_user_id: &str,
        target_user_id: &str,
    ) -> Result<ApiData<MuteResponse>> {
        let route = Route::DeleteMute {
            source_user_id: source_user_id.to_string(),
            target_user_id: target_user_id.to_string(),
        };
        let response: ApiData<MuteResponse> = self.call(Method::DELETE, &route, &[]).await?;

        tracing::info!("{} unmuted {}", source_user_id, target_user_id);
        Ok(response)
    }
}
