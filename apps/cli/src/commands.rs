//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use seeing_stars_core::pipeline::{ExtractSummary, ProgressReporter};
use seeing_stars_fetcher::Fetcher;
use seeing_stars_shared::{
    AppConfig, ExtractConfig, SourceOutcome, init_config, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Seeing-Stars: loose extraction of decade death listings into a text report.
#[derive(Parser)]
#[command(
    name = "seeing-stars",
    version,
    about = "Extract name/date/Wikipedia summaries from Seeing-Stars decade pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch every source and write the summary report.
    Run(RunArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `run`. Each one overrides the config file.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Config file to load instead of ~/.seeing-stars/seeing-stars.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report output path.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Source URL (repeatable). Replaces the configured list.
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User-Agent header value.
    #[arg(long)]
    pub user_agent: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show {
        /// Config file to load instead of the default location.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "seeing_stars=info",
        1 => "seeing_stars=debug",
        _ => "seeing_stars=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(&args).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show { config } => cmd_config_show(config.as_deref()),
        },
    }
}

/// Load the config file named on the command line, or the default one.
fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge CLI flags over the loaded config.
fn resolve_config(app: &AppConfig, args: &RunArgs) -> ExtractConfig {
    let mut config = ExtractConfig::from(app);

    if !args.urls.is_empty() {
        config.urls = args.urls.clone();
    }
    if let Some(out) = &args.out {
        config.output_path = out.clone();
    }
    if let Some(timeout) = args.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(ua) = &args.user_agent {
        config.http.user_agent = ua.clone();
    }

    config
}

async fn cmd_run(args: &RunArgs) -> Result<()> {
    let app = load_app_config(args.config.as_deref())?;
    let config = resolve_config(&app, args);

    info!(
        sources = config.urls.len(),
        output = %config.output_path.display(),
        timeout_secs = config.http.timeout_secs,
        "extracting summaries"
    );

    let fetcher = Fetcher::new(&config.http)?;
    let reporter = CliProgress::new()?;

    let summary = seeing_stars_core::pipeline::run_extract(&config, &fetcher, &reporter).await?;

    println!(
        "Done. Wrote {} entry lines to {}",
        summary.total_entries,
        summary.output_path.display()
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .map_err(|e| eyre!("invalid progress template: {e}"))?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self { spinner })
    }
}

impl ProgressReporter for CliProgress {
    fn source_started(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {url}"));
    }

    fn source_finished(&self, url: &str, outcome: &SourceOutcome) {
        self.spinner.set_message(format!(
            "{url}: {} ({} entries)",
            outcome.kind(),
            outcome.entry_count()
        ));
    }

    fn done(&self, _summary: &ExtractSummary) {
        self.spinner.finish_and_clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seeing_stars_shared::{DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS};

    fn run_args(argv: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(argv).expect("parse args");
        match cli.command {
            Command::Run(args) => args,
            Command::Config { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = run_args(&["seeing-stars", "run"]);
        let config = resolve_config(&AppConfig::default(), &args);
        assert_eq!(config.urls.len(), 7);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn flags_override_config() {
        let args = run_args(&[
            "seeing-stars",
            "run",
            "--url",
            "https://example.com/a",
            "-u",
            "https://example.com/b",
            "--out",
            "/tmp/report.txt",
            "--timeout",
            "3",
            "--user-agent",
            "test-agent",
        ]);
        let config = resolve_config(&AppConfig::default(), &args);
        assert_eq!(config.urls, vec!["https://example.com/a", "https://example.com/b"]);
        assert_eq!(config.output_path, PathBuf::from("/tmp/report.txt"));
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.http.user_agent, "test-agent");
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["seeing-stars", "run", "-vv", "--log-format", "json"])
            .expect("parse args");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn config_file_is_loaded_from_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[sources]\nurls = [\"https://example.com/Died/90s.shtml\"]\n[output]\npath = \"x.txt\"\n",
        )
        .unwrap();

        let app = load_app_config(Some(&path)).unwrap();
        let config = resolve_config(&app, &RunArgs::default());
        assert_eq!(config.urls, vec!["https://example.com/Died/90s.shtml"]);
        assert_eq!(config.output_path, PathBuf::from("x.txt"));
    }
}
