use std::path::PathBuf;

use catalog::{pipeline::FailurePolicy, site::DEFAULT_CITY};
use clap::{Args, Parser, Subcommand, ValueEnum};
use common::utils::{CRAWL_COOLDOWN_MAX_SECS, CRAWL_COOLDOWN_MIN_SECS};
use exporters::{constants::DEFAULT_TABLE_NAME, files::OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "notebooks", about = "Scrapes gaming notebooks from the storefront catalog")]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Newline separated list of notebook URLs shared by both phases
    #[arg(long, global = true, default_value = "urls.txt")]
    pub urls_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk the catalog and save every notebook URL
    Discover(DiscoverArgs),
    /// Collect the notebooks listed in the URL file and save them
    Collect(CollectArgs),
    /// Discover, then collect with the same browser
    Run {
        #[command(flatten)]
        discover: DiscoverArgs,
        #[command(flatten)]
        collect: CollectArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[arg(long, global = true, value_enum, default_value_t = SessionKind::Chrome)]
    pub session: SessionKind,

    /// Show the browser window
    #[arg(long, global = true)]
    pub visible: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Headless Chrome, renders scripts
    Chrome,
    /// Plain HTTP requests, no rendering and no clicks
    Http,
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// City whose prices are collected
    #[arg(long, default_value = DEFAULT_CITY)]
    pub city: String,

    /// Stop after this many listing pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Loads of a single listing page before giving up
    #[arg(long, default_value_t = 3)]
    pub max_fetch_attempts: u32,

    /// Shortest random pause after each listing page
    #[arg(long, default_value_t = CRAWL_COOLDOWN_MIN_SECS)]
    pub cooldown_min_secs: u64,

    /// Longest random pause after each listing page
    #[arg(long, default_value_t = CRAWL_COOLDOWN_MAX_SECS)]
    pub cooldown_max_secs: u64,
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, value_delimiter = ',', default_value = "json,csv,xml,xlsx")]
    pub formats: Vec<OutputFormat>,

    /// Output file name without extension
    #[arg(long, default_value = "notebooks")]
    pub file_stem: String,

    #[arg(long, value_enum, default_value_t = OnItemError::Abort)]
    pub on_item_error: OnItemError,

    /// Checks of the price widget before a notebook is given up on
    #[arg(long, default_value_t = 30)]
    pub max_price_polls: u32,

    /// Wait after opening a notebook page before reading it
    #[arg(long, default_value_t = 5)]
    pub settle_secs: u64,

    /// Also replace the notebooks table in PostgreSQL
    #[arg(long)]
    pub postgres: bool,

    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnItemError {
    Abort,
    Skip,
}

impl From<OnItemError> for FailurePolicy {
    fn from(value: OnItemError) -> Self {
        match value {
            OnItemError::Abort => FailurePolicy::Abort,
            OnItemError::Skip => FailurePolicy::SkipAndLog,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(long = "db-host", env = "HOST")]
    pub host: Option<String>,

    #[arg(long = "db-port", env = "DB_PORT")]
    pub port: Option<u16>,

    #[arg(long = "db-user", env = "USER_NAME")]
    pub user: Option<String>,

    #[arg(long = "db-password", env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long = "db-name", env = "DB_NAME")]
    pub database: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_takes_both_phase_options() {
        let cli = Cli::try_parse_from([
            "notebooks",
            "run",
            "--city",
            "Сочи",
            "--formats",
            "json,xlsx",
            "--on-item-error",
            "skip",
            "--session",
            "http",
        ])
        .unwrap();

        assert_eq!(cli.session.session, SessionKind::Http);
        let Command::Run { discover, collect } = cli.command else {
            panic!("Expected the run command");
        };
        assert_eq!(discover.city, "Сочи");
        assert_eq!(
            (discover.cooldown_min_secs, discover.cooldown_max_secs),
            (6, 9)
        );
        assert_eq!(collect.formats, vec![OutputFormat::Json, OutputFormat::Xlsx]);
        assert_eq!(
            FailurePolicy::from(collect.on_item_error),
            FailurePolicy::SkipAndLog
        );
    }

    #[test]
    fn collect_defaults() {
        let cli = Cli::try_parse_from(["notebooks", "collect"]).unwrap();

        let Command::Collect(collect) = cli.command else {
            panic!("Expected the collect command");
        };
        assert_eq!(collect.formats.len(), 4);
        assert_eq!(collect.max_price_polls, 30);
        assert_eq!(collect.settle_secs, 5);
        assert_eq!(collect.table, "Gaming notebooks");
        assert_eq!(cli.urls_file, PathBuf::from("urls.txt"));
        assert!(!cli.session.visible);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["notebooks", "collect", "--formats", "yaml"]).is_err());
    }
}
