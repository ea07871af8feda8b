/// Command-line arguments
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "shelfmark")]
#[command(version)]
#[command(
    about = "Mark books read on Goodreads as finished in Audiobookshelf",
    long_about = "Reads a Goodreads library export, matches every book on the \"read\" \
                  shelf against an Audiobookshelf catalog and marks confident matches \
                  as finished. Without --apply nothing is changed on the server."
)]
pub struct Cli {
    /// Goodreads library export (CSV)
    #[arg(long, value_name = "PATH")]
    pub goodreads_csv: Option<PathBuf>,

    /// Audiobookshelf base URL
    #[arg(long, env = "ABS_URL", value_name = "URL")]
    pub abs_url: Option<String>,

    /// Audiobookshelf API key
    #[arg(long, env = "ABS_API_KEY", value_name = "KEY", hide_env_values = true)]
    pub abs_api_key: Option<String>,

    /// Send updates to the server (default is a dry run)
    #[arg(long)]
    pub apply: bool,

    /// Minimum score for an automatic match
    #[arg(long, value_name = "F")]
    pub high_threshold: Option<f64>,

    /// Minimum score for a match that needs review
    #[arg(long, value_name = "F")]
    pub low_threshold: Option<f64>,

    /// Only use this Audiobookshelf library
    #[arg(long, value_name = "ID")]
    pub library_id: Option<String>,

    /// Configuration file (default: ./shelfmark.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write the run report as JSON
    #[arg(long, value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "N")]
    pub timeout_secs: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the verbosity level, used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "shelfmark=info",
            1 => "shelfmark=debug",
            _ => "shelfmark=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["shelfmark", "--goodreads-csv", "export.csv"]).unwrap();

        assert_eq!(cli.goodreads_csv, Some(PathBuf::from("export.csv")));
        assert!(!cli.apply);
        assert_eq!(cli.log_filter(), "shelfmark=info");
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "shelfmark",
            "--goodreads-csv",
            "export.csv",
            "--abs-url",
            "http://abs.local",
            "--abs-api-key",
            "secret",
            "--apply",
            "--high-threshold",
            "0.9",
            "--low-threshold",
            "0.5",
            "--library-id",
            "lib_1",
            "--report-json",
            "report.json",
            "--timeout-secs",
            "10",
            "-vv",
        ])
        .unwrap();

        assert!(cli.apply);
        assert_eq!(cli.abs_url.as_deref(), Some("http://abs.local"));
        assert_eq!(cli.high_threshold, Some(0.9));
        assert_eq!(cli.low_threshold, Some(0.5));
        assert_eq!(cli.library_id.as_deref(), Some("lib_1"));
        assert_eq!(cli.timeout_secs, Some(10));
        assert_eq!(cli.log_filter(), "shelfmark=trace");
    }

    #[test]
    fn test_rejects_non_numeric_threshold() {
        let result = Cli::try_parse_from([
            "shelfmark",
            "--goodreads-csv",
            "export.csv",
            "--high-threshold",
            "high",
        ]);
        assert!(result.is_err());
    }
}
