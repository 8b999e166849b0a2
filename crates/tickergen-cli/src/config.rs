use std::path::PathBuf;

use tickergen_core::{PageConfig, PipelineConfig, TypeAllowList, DEFAULT_OBJECT_KEY};

use crate::cli::{Cli, GenerateArgs};
use crate::error::CliError;

/// Origin of the raw feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Url(String),
    File(PathBuf),
}

/// Destination of the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    Bucket(String),
    Directory(PathBuf),
}

/// Fully resolved job settings, checked before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub feed: FeedLocation,
    pub timeout_ms: u64,
    pub pipeline: PipelineConfig,
}

impl JobConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let types: Vec<&str> = cli
            .types
            .iter()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .collect();
        if types.is_empty() {
            return Err(CliError::Config(String::from(
                "at least one instrument type must be allowed",
            )));
        }

        let analytics_id = match cli.ga_tracking_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(id) if is_valid_tracking_id(id) => Some(id.to_owned()),
            Some(id) => {
                return Err(CliError::Config(format!(
                    "tracking id may only contain letters, digits, '-' and '_': '{id}'"
                )))
            }
        };

        let feed = match &cli.feed_file {
            Some(path) => FeedLocation::File(path.clone()),
            None => FeedLocation::Url(cli.feed_url.clone()),
        };

        Ok(Self {
            feed,
            timeout_ms: cli.timeout_ms,
            pipeline: PipelineConfig {
                allowed_types: TypeAllowList::new(types),
                page: PageConfig::new(cli.screener_url.clone(), analytics_id),
                object_key: String::from(DEFAULT_OBJECT_KEY),
            },
        })
    }

    pub fn with_object_key(mut self, object_key: &str) -> Result<Self, CliError> {
        let key = object_key.trim().trim_start_matches('/');
        if key.is_empty() || key.split('/').any(|segment| segment == "..") {
            return Err(CliError::Config(format!("invalid object key '{object_key}'")));
        }
        self.pipeline.object_key = key.to_owned();
        Ok(self)
    }
}

impl PublishTarget {
    pub fn from_args(args: &GenerateArgs) -> Result<Self, CliError> {
        match (&args.bucket_url, &args.output_dir) {
            (Some(url), None) if !url.trim().is_empty() => Ok(Self::Bucket(url.trim().to_owned())),
            (None, Some(dir)) => Ok(Self::Directory(dir.clone())),
            (Some(_), Some(_)) => Err(CliError::Config(String::from(
                "--bucket-url and --output-dir are mutually exclusive",
            ))),
            _ => Err(CliError::Config(String::from(
                "a publish target is required: --bucket-url or --output-dir",
            ))),
        }
    }
}

fn is_valid_tracking_id(id: &str) -> bool {
    id.chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
