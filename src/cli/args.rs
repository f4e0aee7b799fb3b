//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, TimelineKind};

/// Twitter API client CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tweetkit",
    version,
    about = "Upload media and manage mutes and timelines on Twitter",
    long_about = "A CLI over the Twitter v2 API and the chunked v1.1 media upload.\n\n\
                  Credentials come from the config file and may be overridden by flags or \
                  TWITTER_* environment variables."
)]
pub struct Args {
    /// Path to configuration file (defaults to the platform config directory).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Consumer (API) key.
    #[arg(long, env = "TWITTER_CONSUMER_KEY", hide_env_values = true)]
    pub consumer_key: Option<String>,

    /// Consumer (API) secret.
    #[arg(long, env = "TWITTER_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,

    /// User access token.
    #[arg(long, env = "TWITTER_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// User access token secret.
    #[arg(long, env = "TWITTER_ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub access_token_secret: Option<String>,

    /// App-only bearer token.
    #[arg(long, env = "TWITTER_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Segment size in bytes for media uploads.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a media file with the chunked INIT/APPEND/FINALIZE flow.
    Upload {
        /// File to upload.
        file: PathBuf,

        /// MIME type, e.g. video/mp4. Guessed from the extension if omitted.
        #[arg(long)]
        mime: Option<String>,
    },

    /// List the users muted by a user.
    Muted {
        /// Numeric id of the muting user.
        user_id: String,

        /// Page size (1-1000).
        #[arg(long, default_value_t = 100)]
        max_results: u32,

        /// Token from a previous page's `next_token`.
        #[arg(long)]
        pagination_token: Option<String>,
    },

    /// Mute a user.
    Mute {
        /// Numeric id of the muting user.
        source_user_id: String,
        /// Numeric id of the user to mute.
        target_user_id: String,
    },

    /// Unmute a user.
    Unmute {
        /// Numeric id of the muting user.
        source_user_id: String,
        /// Numeric id of the user to unmute.
        target_user_id: String,
    },

    /// Read a user's timeline.
    Timeline {
        /// Numeric user id.
        user_id: String,

        /// Which timeline to read.
        #[arg(long, value_enum, default_value_t = TimelineKindArg::Tweets)]
        kind: TimelineKindArg,

        /// Page size.
        #[arg(long)]
        max_results: Option<u32>,
    },
}

/// CLI timeline argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimelineKindArg {
    /// Tweets authored by the user.
    Tweets,
    /// Tweets mentioning the user.
    Mentions,
    /// Reverse-chronological home timeline.
    Home,
}

impl From<TimelineKindArg> for TimelineKind {
    fn from(arg: TimelineKindArg) -> Self {
        match arg {
            TimelineKindArg::Tweets => TimelineKind::Tweets,
            TimelineKindArg::Mentions => TimelineKind::Mentions,
            TimelineKindArg::Home => TimelineKind::Home,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        let credentials = &mut config.credentials;

        if let Some(key) = &self.consumer_key {
            credentials.consumer_key = Some(key.clone());
        }

        if let Some(secret) = &self.consumer_secret {
            credentials.consumer_secret = Some(secret.clone());
        }

        if let Some(token) = &self.access_token {
            credentials.access_token = Some(token.clone());
        }

        if let Some(secret) = &self.access_token_secret {
            credentials.access_token_secret = Some(secret.clone());
        }

        if let Some(bearer) = &self.bearer_token {
            credentials.bearer_token = Some(bearer.clone());
        }

        if let Some(chunk_size) = self.chunk_size {
            config.api.chunk_size = chunk_size;
        }
    }
}
