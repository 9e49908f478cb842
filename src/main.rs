//! synonym-shortlist CLI
//!
//! Fetch synonyms for the given words, review them one key at a time,
//! and save the ones worth keeping.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{Dispatch, Level};

use synonym_shortlist::export::Exporter;
use synonym_shortlist::logging::{self, LogConfig};
use synonym_shortlist::source::source_from_config;
use synonym_shortlist::tui::{self, Exit};
use synonym_shortlist::types::{
    ApiConfig, CandidateMap, DEFAULT_API_KEY_FILE, DEFAULT_API_URL, DEFAULT_RESULT_FORMAT,
    SaveChoice, SourceConfig,
};

#[derive(Parser)]
#[command(name = "synonym-shortlist")]
#[command(about = "Review thesaurus synonyms for some words and keep the ones you like")]
#[command(version)]
struct Cli {
    /// Words to find synonyms for
    #[arg(required = true, value_parser = NonEmptyStringValueParser::new())]
    words: Vec<String>,

    /// Read candidates from a JSON fixture instead of the thesaurus API
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Simulated fetch latency for the fixture, in milliseconds
    #[arg(long, value_name = "MS", requires = "fixture")]
    latency_ms: Option<u64>,

    /// File whose first line is the thesaurus API key
    #[arg(long, value_name = "PATH", default_value = DEFAULT_API_KEY_FILE)]
    api_key_file: PathBuf,

    /// Thesaurus API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Result-format marker sent to the thesaurus API
    #[arg(long, value_name = "MARKER", default_value = DEFAULT_RESULT_FORMAT)]
    format: String,

    /// Log file (default: in the user cache directory)
    #[arg(long, value_name = "PATH", conflicts_with = "no_log")]
    log_file: Option<PathBuf>,

    /// Disable logging
    #[arg(long)]
    no_log: bool,

    /// Log decisions and other detail
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        match &self.fixture {
            Some(path) => SourceConfig::Fixture {
                path: path.clone(),
                latency: self.latency_ms.map(Duration::from_millis),
            },
            None => SourceConfig::Api(ApiConfig {
                base_url: self.api_url.clone(),
                key_file: self.api_key_file.clone(),
                format: self.format.clone(),
                ..Default::default()
            }),
        }
    }

    fn log_config(&self) -> LogConfig {
        let defaults = LogConfig::default();
        LogConfig {
            level: if self.verbose { Level::DEBUG } else { defaults.level },
            log_file: if self.no_log {
                None
            } else {
                self.log_file.clone().or(defaults.log_file)
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let log = open_log(cli)?;

    let candidates = fetch_candidates(cli, &log)?;

    match tui::run(candidates, log.clone()).map_err(|e| format!("Terminal error: {}", e))? {
        Exit::Aborted => Ok(()),
        Exit::Completed { choice: SaveChoice::Discard, .. } => {
            println!("Shortlist discarded.");
            Ok(())
        }
        Exit::Completed { shortlist, choice: SaveChoice::Save(format) } => {
            let dir = std::env::current_dir().map_err(|e| e.to_string())?;
            let path = Exporter::new(dir, log)
                .save(&shortlist, format)
                .map_err(|e| format!("Cannot save shortlist: {}", e))?;
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

/// An explicit `--log-file` must open; the default location is best effort.
fn open_log(cli: &Cli) -> Result<Dispatch, String> {
    let config = cli.log_config();
    if cli.log_file.is_some() {
        return logging::dispatch(&config).map_err(|e| format!("Cannot open log file: {}", e));
    }

    let (log, warning) = logging::dispatch_or_silent(&config);
    if let Some(e) = warning {
        eprintln!("Warning: logging disabled: {}", e);
    }
    Ok(log)
}

// ============================================================================
// FETCHING
// ============================================================================

fn fetch_candidates(cli: &Cli, log: &Dispatch) -> Result<CandidateMap, String> {
    let _log = tracing::dispatcher::set_default(log);

    let source = source_from_config(&cli.source_config()).map_err(|e| e.to_string())?;

    let pb = spinner("Fetching synonyms...");
    let result = source.fetch(&cli.words);
    pb.finish_and_clear();

    result.map_err(|e| e.to_string())
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn words_are_required() {
        let err = Cli::try_parse_from(["synonym-shortlist"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_word_is_rejected() {
        assert!(Cli::try_parse_from(["synonym-shortlist", ""]).is_err());
    }

    #[test]
    fn defaults_select_live_api() {
        let cli = Cli::try_parse_from(["synonym-shortlist", "liquid", "great"]).unwrap();
        assert_eq!(cli.words, vec!["liquid", "great"]);
        assert_eq!(cli.source_config(), SourceConfig::Api(ApiConfig::default()));
    }

    #[test]
    fn fixture_flag_selects_fixture() {
        let cli = Cli::try_parse_from([
            "synonym-shortlist",
            "--fixture",
            "fixtures/synonyms.json",
            "--latency-ms",
            "250",
            "liquid",
        ])
        .unwrap();
        assert_eq!(
            cli.source_config(),
            SourceConfig::Fixture {
                path: PathBuf::from("fixtures/synonyms.json"),
                latency: Some(Duration::from_millis(250)),
            }
        );
    }

    #[test]
    fn latency_requires_fixture() {
        assert!(Cli::try_parse_from(["synonym-shortlist", "--latency-ms", "5", "liquid"]).is_err());
    }

    #[test]
    fn log_flags_shape_log_config() {
        let cli = Cli::try_parse_from(["synonym-shortlist", "--no-log", "-v", "liquid"]).unwrap();
        assert_eq!(
            cli.log_config(),
            LogConfig {
                level: Level::DEBUG,
                log_file: None,
            }
        );

        let cli =
            Cli::try_parse_from(["synonym-shortlist", "--log-file", "x.log", "liquid"]).unwrap();
        assert_eq!(cli.log_config().log_file, Some(PathBuf::from("x.log")));
        assert_eq!(cli.log_config().level, Level::INFO);
    }

    #[test]
    fn explicit_log_file_that_cannot_open_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("x.log");
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["synonym-shortlist", "--log-file", path, "liquid"]).unwrap();
        let err = open_log(&cli).err().unwrap();
        assert!(err.starts_with("Cannot open log file:"));
    }

    #[test]
    fn disabled_log_opens_silently() {
        let cli = Cli::try_parse_from(["synonym-shortlist", "--no-log", "liquid"]).unwrap();
        assert!(open_log(&cli).is_ok());
    }
}
