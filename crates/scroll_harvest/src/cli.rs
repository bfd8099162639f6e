use std::path::PathBuf;

use clap::Parser;
use harvest_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

/// Watch a target listing page and harvest `(href, codename)` pairs as it grows.
#[derive(Debug, Clone, Parser)]
#[command(name = "scroll_harvest", version, about)]
pub struct Args {
    /// Page to watch: an http(s) URL or a path to a saved HTML file.
    pub source: String,

    /// RON configuration file; flags given here override its values.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// How often the page is re-read to detect growth, in milliseconds.
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Quiet period after the last change before extracting, in milliseconds.
    #[arg(long)]
    pub quiet_ms: Option<u64>,

    /// Pause before reading each new item's codename, in milliseconds.
    #[arg(long)]
    pub item_delay_ms: Option<u64>,

    /// Stop after this many consecutive polls without change (0 = run until Ctrl-C).
    #[arg(long)]
    pub idle_polls: Option<u32>,

    /// Directory to write the JSON results export into on exit.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also write logs to ./harvest.log.
    #[arg(long)]
    pub log_file: bool,

    /// Write logs only to ./harvest.log, keeping the terminal for the results dump.
    #[arg(long, conflicts_with = "log_file")]
    pub log_file_only: bool,

    /// Log at debug level.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        if self.log_file_only {
            LogDestination::File(DEFAULT_LOG_FILE.into())
        } else if self.log_file {
            LogDestination::Both(DEFAULT_LOG_FILE.into())
        } else {
            LogDestination::Terminal
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn logs_to_terminal_by_default() {
        let args = Args::parse_from(["scroll_harvest", "page.html"]);
        assert!(matches!(args.log_destination(), LogDestination::Terminal));
        assert_eq!(args.log_level(), LevelFilter::Info);
    }

    #[test]
    fn log_file_only_skips_the_terminal() {
        let args = Args::parse_from(["scroll_harvest", "--log-file-only", "-v", "page.html"]);
        match args.log_destination() {
            LogDestination::File(path) => assert_eq!(path, PathBuf::from(DEFAULT_LOG_FILE)),
            other => panic!("unexpected destination {other:?}"),
        }
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn log_file_also_logs_to_terminal() {
        let args = Args::parse_from(["scroll_harvest", "--log-file", "page.html"]);
        assert!(matches!(args.log_destination(), LogDestination::Both(_)));
    }

    #[test]
    fn log_file_flags_conflict() {
        let parsed =
            Args::try_parse_from(["scroll_harvest", "--log-file", "--log-file-only", "page.html"]);
        assert!(parsed.is_err());
    }
}
