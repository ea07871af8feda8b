/// Run configuration: file, environment, then command-line flags
use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use shelfmark_abs_client::AbsConfig;
use shelfmark_core::{Result, ShelfmarkError};
use shelfmark_importer::MatchConfig;
use shelfmark_sync::{RetryPolicy, RunOptions, UpdateMode};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File used when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "shelfmark.toml";

/// Settings as read from the config file and `SHELFMARK_*` variables
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub goodreads_csv: Option<PathBuf>,
    pub abs_url: Option<String>,
    pub abs_api_key: Option<String>,
    pub library_id: Option<String>,
    pub timeout_secs: u64,
    pub high_threshold: f64,
    pub low_threshold: f64,
    pub title_weight: f64,
    pub retry_delay_secs: u64,
    pub report_json: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let matching = MatchConfig::default();
        Self {
            goodreads_csv: None,
            abs_url: None,
            abs_api_key: None,
            library_id: None,
            timeout_secs: default_timeout_secs(),
            high_threshold: matching.high_threshold,
            low_threshold: matching.low_threshold,
            title_weight: matching.title_weight,
            retry_delay_secs: default_retry_delay_secs(),
            report_json: None,
        }
    }
}

/// Fully resolved and validated settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub goodreads_csv: PathBuf,
    pub abs: AbsConfig,
    pub options: RunOptions,
    pub report_json: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `shelfmark.toml` in the working
    /// directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SHELFMARK_)
        settings = settings.add_source(
            config::Environment::with_prefix("SHELFMARK").try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ShelfmarkError::config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ShelfmarkError::config(e.to_string()))
    }

    /// Apply command-line flags on top of the loaded values
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.goodreads_csv {
            self.goodreads_csv = Some(path.clone());
        }
        if let Some(url) = &cli.abs_url {
            self.abs_url = Some(url.clone());
        }
        if let Some(key) = &cli.abs_api_key {
            self.abs_api_key = Some(key.clone());
        }
        if let Some(id) = &cli.library_id {
            self.library_id = Some(id.clone());
        }
        if let Some(secs) = cli.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(high) = cli.high_threshold {
            self.high_threshold = high;
        }
        if let Some(low) = cli.low_threshold {
            self.low_threshold = low;
        }
        if let Some(path) = &cli.report_json {
            self.report_json = Some(path.clone());
        }
        self
    }

    /// Validate and resolve into a [`RunConfig`]
    pub fn resolve(self, mode: UpdateMode) -> Result<RunConfig> {
        let goodreads_csv = self
            .goodreads_csv
            .ok_or_else(|| ShelfmarkError::config("Goodreads export is required (--goodreads-csv)"))?;

        let abs_url = non_blank(self.abs_url).ok_or_else(|| {
            ShelfmarkError::config("Audiobookshelf URL is required (--abs-url or ABS_URL)")
        })?;

        let api_key = non_blank(self.abs_api_key).ok_or_else(|| {
            ShelfmarkError::config("Audiobookshelf API key is required (--abs-api-key or ABS_API_KEY)")
        })?;

        if self.timeout_secs == 0 {
            return Err(ShelfmarkError::config("timeout_secs must be at least 1"));
        }

        let match_config = MatchConfig {
            high_threshold: self.high_threshold,
            low_threshold: self.low_threshold,
            title_weight: self.title_weight,
        };
        match_config.validate()?;

        let mut abs = AbsConfig::new(abs_url, api_key)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(library_id) = non_blank(self.library_id) {
            abs = abs.with_library(library_id);
        }

        Ok(RunConfig {
            goodreads_csv,
            abs,
            options: RunOptions {
                match_config,
                mode,
                retry: RetryPolicy {
                    delay: Duration::from_secs(self.retry_delay_secs),
                },
            },
            report_json: self.report_json,
        })
    }
}

impl RunConfig {
    /// Settings from all sources, in increasing precedence
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Settings::load(cli.config.as_deref())?
            .merge_cli(cli)
            .resolve(UpdateMode::from_apply_flag(cli.apply))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Default values
fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_delay_secs() -> u64 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn complete() -> Settings {
        Settings {
            goodreads_csv: Some(PathBuf::from("export.csv")),
            abs_url: Some("http://abs.local".to_string()),
            abs_api_key: Some("secret".to_string()),
            ..Settings::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.high_threshold, 0.85);
        assert_eq!(settings.low_threshold, 0.60);
    }

    #[test]
    fn test_resolve_complete_settings() {
        let run = complete().resolve(UpdateMode::DryRun).unwrap();

        assert_eq!(run.abs.url, "http://abs.local");
        assert_eq!(run.abs.timeout, Duration::from_secs(30));
        assert_eq!(run.abs.library_id, None);
        assert_eq!(run.options.mode, UpdateMode::DryRun);
        assert_eq!(run.options.retry.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let settings = Settings {
            abs_url: None,
            ..complete()
        };
        let result = settings.resolve(UpdateMode::DryRun);
        assert!(matches!(result, Err(ShelfmarkError::Config(_))));
    }

    #[test]
    fn test_blank_api_key_is_config_error() {
        let settings = Settings {
            abs_api_key: Some("   ".to_string()),
            ..complete()
        };
        let result = settings.resolve(UpdateMode::DryRun);
        assert!(matches!(result, Err(ShelfmarkError::Config(_))));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let settings = Settings {
            high_threshold: 0.5,
            low_threshold: 0.7,
            ..complete()
        };
        let result = settings.resolve(UpdateMode::Live);
        assert!(matches!(result, Err(ShelfmarkError::Config(_))));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli {
            abs_url: Some("http://cli.local".to_string()),
            high_threshold: Some(0.9),
            library_id: Some("lib_2".to_string()),
            ..Cli::default()
        };

        let run = complete()
            .merge_cli(&cli)
            .resolve(UpdateMode::Live)
            .unwrap();

        assert_eq!(run.abs.url, "http://cli.local");
        assert_eq!(run.abs.api_key, "secret");
        assert_eq!(run.abs.library_id.as_deref(), Some("lib_2"));
        assert_eq!(run.options.match_config.high_threshold, 0.9);
        assert_eq!(run.options.match_config.low_threshold, 0.60);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "abs_url = \"http://file.local\"\nhigh_threshold = 0.95\ntimeout_secs = 5"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.abs_url.as_deref(), Some("http://file.local"));
        assert_eq!(settings.high_threshold, 0.95);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.low_threshold, 0.60);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/shelfmark.toml")));
        assert!(matches!(result, Err(ShelfmarkError::Config(_))));
    }
}
