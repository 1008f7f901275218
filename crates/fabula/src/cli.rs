//! Command-line harness for compiled suites.
//!
//! A test binary declares its [`Suite`] and hands it to [`run`], which parses
//! the flags, loads the [`RunnerConfig`], runs the selected stories and
//! reports to the console and, when a transcript directory is configured, to
//! disk.

use crate::RunnerConfig;
use clap::Parser;
use fabula_core::Suite;
use fabula_error::{FabulaResult, RunError};
use fabula_interface::DriverFactory;
use fabula_runner::{
    ConsoleReporter, ObserverChain, Pattern, RunOptions, RunSummary, parse_patterns, run_topics,
};
use fabula_transcript::TranscriptWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fabula")]
#[command(about = "Run API stories and record what they did")]
#[command(version)]
pub struct Cli {
    /// Topics to run: comma-separated regexes, `!` inverts
    #[arg(short = 's', long, value_name = "PATTERNS")]
    pub topics: Option<String>,

    /// Stories to run: comma-separated regexes, `!` inverts
    #[arg(short = 't', long, value_name = "PATTERNS")]
    pub stories: Option<String>,

    /// Paths to run: comma-separated regexes, `!` inverts
    #[arg(short = 'p', long, value_name = "PATTERNS")]
    pub paths: Option<String>,

    /// Directory to write transcripts to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub transcripts: Option<PathBuf>,

    /// Base URL of the API under test
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Configuration file (defaults to fabula.toml when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Commit of the API under test, recorded in the transcript index
    #[arg(long, value_name = "SHA")]
    pub commit: Option<String>,
}

impl Cli {
    /// Compiles the filter flags.
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid regex.
    pub fn run_options(&self) -> Result<RunOptions, RunError> {
        Ok(RunOptions::new(
            patterns(self.topics.as_deref())?,
            patterns(self.stories.as_deref())?,
            patterns(self.paths.as_deref())?,
        ))
    }

    /// Loads the layered configuration with this invocation's overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn runner_config(&self) -> FabulaResult<RunnerConfig> {
        let config = RunnerConfig::load(self.config.as_deref())?;
        Ok(config.with_overrides(
            self.endpoint.clone(),
            self.transcripts.clone(),
            self.commit.clone(),
        ))
    }
}

fn patterns(list: Option<&str>) -> Result<Option<Vec<Pattern>>, RunError> {
    list.map(parse_patterns).transpose()
}

/// Installs the tracing subscriber: `warn` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Parses the process arguments and runs `suite`.
///
/// `make_factory` receives the loaded configuration and returns the factory
/// creating one driver per path. Returns a failing exit code when any path
/// failed or errored, any expectation failed, or the run could not start.
pub async fn run<F, M>(suite: &Suite<F::Driver>, make_factory: M) -> ExitCode
where
    F: DriverFactory,
    M: FnOnce(&RunnerConfig) -> F,
{
    init_tracing();
    if dotenvy::dotenv().is_err() {
        tracing::debug!("No .env file loaded");
    }
    run_with(Cli::parse(), suite, make_factory).await
}

/// Runs `suite` with already parsed arguments.
#[instrument(skip_all)]
pub async fn run_with<F, M>(cli: Cli, suite: &Suite<F::Driver>, make_factory: M) -> ExitCode
where
    F: DriverFactory,
    M: FnOnce(&RunnerConfig) -> F,
{
    match execute(&cli, suite, make_factory).await {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Run could not start");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute<F, M>(
    cli: &Cli,
    suite: &Suite<F::Driver>,
    make_factory: M,
) -> FabulaResult<RunSummary>
where
    F: DriverFactory,
    M: FnOnce(&RunnerConfig) -> F,
{
    let options = cli.run_options()?;
    let config = cli.runner_config()?;
    let factory = make_factory(&config);

    let mut observers = ObserverChain::new().with(ConsoleReporter::stdout());
    if let Some(dir) = config.transcripts_dir() {
        info!(dir = %dir.display(), "Writing transcripts");
        observers = observers.with(TranscriptWriter::new(dir.clone(), config.commit().clone())?);
    }

    Ok(run_topics(suite, &factory, &options, &mut observers).await)
}
