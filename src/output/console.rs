//! Console output utilities.

use console::style;

use crate::api::{Tweet, User};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Format a user as `@username (Name) [id]`.
pub fn format_user(user: &User) -> String {
    format!("@{} ({}) [{}]", user.username, user.name, user.id)
}

/// Format a tweet on one line, with its author's handle when known.
pub fn format_tweet(tweet: &Tweet, author: Option<&User>) -> String {
    let text = tweet.text.replace('\n', " ");
    match author {
        Some(user) => format!("{} @{}: {}", tweet.id, user.username, text),
        None => format!("{} {}", tweet.id, text),
    }
}

/// Print a list of users.
pub fn print_users(users: &[User]) {
    for user in users {
        println!("  {}", format_user(user));
    }
}

/// Print a list of tweets, resolving authors from `includes`.
pub fn print_tweets(tweets: &[Tweet], includes: &[User]) {
    for tweet in tweets {
        let author = tweet
            .author_id
            .as_deref()
            .and_then(|id| includes.iter().find(|u| u.id == id));
        println!("  {}", format_tweet(tweet, author));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "9", "name": "Nine", "username": "nine"
        }))
        .unwrap()
    }

    #[test]
    fn test_format_user() {
        assert_eq!(format_user(&user()), "@nine (Nine) [9]");
    }

    #[test]
    fn test_format_tweet() {
        let tweet: Tweet = serde_json::from_value(serde_json::json!({
            "id": "1", "text": "hello\nworld", "author_id": "9"
        }))
        .unwrap();

        assert_eq!(format_tweet(&tweet, Some(&user())), "1 @nine: hello world");
        assert_eq!(format_tweet(&tweet, None), "1 hello world");
    }
}
