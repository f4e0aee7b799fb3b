//! tweetkit - CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tweetkit::{
    api::{TimelineQuery, TweetExpansion, TweetField, TwitterApi, UserField, UserQuery},
    cli::{Args, Command},
    config::{parse_user_id, validate_config, Config, TimelineKind},
    error::{exit_codes, Error, Result},
    media::{chunk_count, MimeType},
    output::{
        create_chunk_bar, create_spinner, print_error, print_info, print_page_summary,
        print_success, print_tweets, print_upload_summary, print_users, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Config(_)
        | Error::ConfigValidation { .. }
        | Error::MissingConfig(_)
        | Error::TomlParse(_)
        | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
        Error::UploadFailed { .. } | Error::EmptyMedia => exit_codes::UPLOAD_ERROR,
        Error::Api { .. }
        | Error::Authentication(_)
        | Error::RateLimited(_)
        | Error::RangeOutOfBounds { .. }
        | Error::WrongAuthenticationType { .. }
        | Error::OAuthToken
        | Error::OAuth(_)
        | Error::Http(_)
        | Error::Json(_) => exit_codes::API_ERROR,
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration
    let mut config = load_config(args.config.as_deref())?;

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    let api = TwitterApi::from_config(&config)?;
    tracing::debug!("Using {} authentication", api.authentication().kind());

    match args.command {
        Command::Upload { file, mime } => {
            upload(&api, &file, mime.as_deref(), config.api.chunk_size).await
        }
        Command::Muted {
            user_id,
            max_results,
            pagination_token,
        } => {
            let user_id = parse_user_id(&user_id)?;
            let query = UserQuery {
                user_fields: vec![UserField::CreatedAt, UserField::Description],
                tweet_fields: Vec::new(),
                max_results,
                pagination_token,
            };

            let page = api.get_muted_users(&user_id, &query).await?;
            let users = page.data.unwrap_or_default();
            if users.is_empty() {
                print_info("No muted users");
            } else {
                print_users(&users);
            }
            print_page_summary(page.meta.as_ref());
            Ok(())
        }
        Command::Mute {
            source_user_id,
            target_user_id,
        } => {
            let source = parse_user_id(&source_user_id)?;
            let target = parse_user_id(&target_user_id)?;
            let response = api.mute_user(&source, &target).await?;
            if response.data.muting {
                print_success(&format!("{} now mutes {}", source, target));
            } else {
                print_warning(&format!("{} does not mute {}", source, target));
            }
            Ok(())
        }
        Command::Unmute {
            source_user_id,
            target_user_id,
        } => {
            let source = parse_user_id(&source_user_id)?;
            let target = parse_user_id(&target_user_id)?;
            let response = api.unmute_user(&source, &target).await?;
            if response.data.muting {
                print_warning(&format!("{} still mutes {}", source, target));
            } else {
                print_success(&format!("{} no longer mutes {}", source, target));
            }
            Ok(())
        }
        Command::Timeline {
            user_id,
            kind,
            max_results,
        } => {
            let user_id = parse_user_id(&user_id)?;
            let query = TimelineQuery {
                tweet_fields: vec![TweetField::CreatedAt, TweetField::AuthorId],
                expansions: vec![TweetExpansion::AuthorId],
                max_results,
                ..Default::default()
            };

            let page = match TimelineKind::from(kind) {
                TimelineKind::Tweets => api.get_user_tweets(&user_id, &query).await?,
                TimelineKind::Mentions => api.get_user_mentions(&user_id, &query).await?,
                TimelineKind::Home => {
                    api.get_reverse_chronological_timeline(&user_id, &query)
                        .await?
                }
            };

            let tweets = page.data.unwrap_or_default();
            let authors = page.includes.map(|i| i.users).unwrap_or_default();
            if tweets.is_empty() {
                print_info("No tweets");
            } else {
                print_tweets(&tweets, &authors);
            }
            print_page_summary(page.meta.as_ref());
            Ok(())
        }
    }
}

/// Load the config file, or fall back to defaults when none exists.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    match Config::default_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading configuration from {}", path.display());
            Config::load(&path)
        }
        _ => {
            tracing::debug!("No configuration file; using defaults and environment");
            Ok(Config::default())
        }
    }
}

async fn upload(
    api: &TwitterApi,
    file: &Path,
    mime: Option<&str>,
    chunk_size: usize,
) -> Result<()> {
    let mime_type = match mime {
        Some(value) => value.parse::<MimeType>()?,
        None => MimeType::from_path(file)?,
    };

    let spinner = create_spinner(&format!("Reading {}", file.display()));
    let data = tokio::fs::read(file).await?;
    spinner.finish_and_clear();

    print_info(&format!(
        "Uploading {} ({}, {} bytes)",
        file.display(),
        mime_type,
        data.len()
    ));

    let chunks = chunk_count(data.len(), chunk_size);
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bar = create_chunk_bar(chunks as u64, &name);

    let result = api
        .upload_with_progress(&data, mime_type, |appended, _| {
            bar.set_position(appended as u64);
        })
        .await;
    bar.finish_and_clear();

    let response = result?;
    print_upload_summary(&response, data.len(), chunks);
    Ok(())
}
