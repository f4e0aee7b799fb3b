//! Media MIME types accepted by the upload endpoint.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Upload category the server files a media object under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    TweetImage,
    TweetGif,
    TweetVideo,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::TweetImage => "tweet_image",
            MediaCategory::TweetGif => "tweet_gif",
            MediaCategory::TweetVideo => "tweet_video",
        }
    }
}

/// Supported media MIME types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Gif,
    Jpeg,
    Png,
    Webp,
    Mp4,
    Mov,
}

impl MimeType {
    /// Value sent as `media_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Gif => "image/gif",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
            MimeType::Webp => "image/webp",
            MimeType::Mp4 => "video/mp4",
            MimeType::Mov => "video/quicktime",
        }
    }

    /// Value sent as `media_category`.
    pub fn media_category(&self) -> MediaCategory {
        match self {
            MimeType::Gif => MediaCategory::TweetGif,
            MimeType::Jpeg | MimeType::Png | MimeType::Webp => MediaCategory::TweetImage,
            MimeType::Mp4 | MimeType::Mov => MediaCategory::TweetVideo,
        }
    }

    /// Guess the MIME type from a file name's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let guess = mime_guess::from_path(path).first().ok_or_else(|| {
            Error::Config(format!(
                "Cannot determine MIME type of {}; pass --mime explicitly",
                path.display()
            ))
        })?;

        guess.essence_str().parse()
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "image/gif" | "gif" => Ok(MimeType::Gif),
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Ok(MimeType::Jpeg),
            "image/png" | "png" => Ok(MimeType::Png),
            "image/webp" | "webp" => Ok(MimeType::Webp),
            "video/mp4" | "mp4" => Ok(MimeType::Mp4),
            "video/quicktime" | "mov" => Ok(MimeType::Mov),
            _ => Err(Error::Config(format!("Unsupported media type: {}", s))),
        }
    }
}
