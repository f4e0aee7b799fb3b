//! Endpoint paths of the v2 API.

/// A v2 endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Muting(String),
    DeleteMute {
        source_user_id: String,
        target_user_id: String,
    },
    UserTweets(String),
    UserMentions(String),
    ReverseChronological(String),
}

impl Route {
    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Route::Muting(id) => format!("/2/users/{}/muting", id),
            Route::DeleteMute {
                source_user_id,
                target_user_id,
            } => format!("/2/users/{}/muting/{}", source_user_id, target_user_id),
            Route::UserTweets(id) => format!("/2/users/{}/tweets", id),
            Route::UserMentions(id) => format!("/2/users/{}/mentions", id),
            Route::ReverseChronological(id) => {
                format!("/2/users/{}/timelines/reverse_chronological", id)
            }
        }
    }

    /// User ids interpolated into the path.
    pub fn user_ids(&self) -> Vec<&str> {
        match self {
            Route::Muting(id)
            | Route::UserTweets(id)
            | Route::UserMentions(id)
            | Route::ReverseChronological(id) => vec![id.as_str()],
            Route::DeleteMute {
                source_user_id,
                target_user_id,
            } => vec![source_user_id.as_str(), target_user_id.as_str()],
        }
    }
}
