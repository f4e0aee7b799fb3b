//! Timeline selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which timeline the `timeline` command reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    /// Tweets authored by the user (default).
    #[default]
    Tweets,
    /// Tweets mentioning the user.
    Mentions,
    /// Reverse-chronological home timeline; needs user access tokens.
    Home,
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineKind::Tweets => write!(f, "tweets"),
            TimelineKind::Mentions => write!(f, "mentions"),
            TimelineKind::Home => write!(f, "home"),
        }
    }
}

impl FromStr for TimelineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tweets" => Ok(TimelineKind::Tweets),
            "mentions" => Ok(TimelineKind::Mentions),
            "home" | "reverse_chronological" => Ok(TimelineKind::Home),
            _ => Err(format!("Unknown timeline: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for kind in [TimelineKind::Tweets, TimelineKind::Mentions, TimelineKind::Home] {
            assert_eq!(kind.to_string().parse::<TimelineKind>().unwrap(), kind);
        }
        assert_eq!("HOME".parse::<TimelineKind>().unwrap(), TimelineKind::Home);
        assert!("likes".parse::<TimelineKind>().is_err());
    }
}
