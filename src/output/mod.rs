//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Result summaries

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    format_tweet, format_user, print_error, print_info, print_success, print_tweets,
    print_users, print_warning,
};
pub use progress::{create_chunk_bar, create_spinner};
pub use stats::{print_page_summary, print_upload_summary};
