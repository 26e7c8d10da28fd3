use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use retext_core::{
    config::{load_request, Settings},
    find_and_prepare_changes, ChangeRequest, Error, HttpFetcher, Suggestion,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RETEXT_LOG";
const SUGGESTION_SEPARATOR: &str = "=>";

#[derive(Parser)]
#[command(
    name = "retext",
    about = "Locate text on a web page and plan in-place substitutions without touching the page"
)]
struct Cli {
    /// Request file (TOML, or JSON with a .json extension) holding `url` and `suggestions`.
    /// Without a request file or --url the built-in demonstration request runs.
    #[arg(conflicts_with = "url")]
    request: Option<PathBuf>,
    /// Page to inspect: http(s) URL, file:// URL or local path
    #[arg(long)]
    url: Option<String>,
    /// Suggestion as CURRENT=>NEW (repeatable, used with --url)
    #[arg(long = "suggest", value_name = "CURRENT=>NEW", requires = "url")]
    suggestions: Vec<String>,
    /// Output layout
    #[arg(long, value_enum, default_value_t = Format::Flat)]
    format: Format,
    /// Fetch timeout in seconds, overriding config.toml
    #[arg(long)]
    timeout: Option<u64>,
    /// Settings file to use instead of the one in the config directory
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log at debug level (RETEXT_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `change_log` + `unmatched` record
    Flat,
    /// One record per suggestion with its own change log
    Grouped,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::load()?,
    };
    if let Some(timeout) = cli.timeout {
        settings.fetch.timeout_secs = timeout;
    }
    debug!(?settings, "using settings");

    let request = build_request(cli)?;
    let fetcher = HttpFetcher::new(&settings.fetch)?;
    let report = find_and_prepare_changes(&fetcher, &request)?;
    if !report.unmatched.is_empty() {
        info!(unmatched = ?report.unmatched, "some suggestions were not found on the page");
    }

    let json = match cli.format {
        Format::Flat => serde_json::to_string_pretty(&report)?,
        Format::Grouped => {
            serde_json::to_string_pretty(&report.by_suggestion(&request.suggestions))?
        }
    };
    println!("{json}");
    Ok(())
}

fn build_request(cli: &Cli) -> Result<ChangeRequest, Error> {
    if let Some(path) = &cli.request {
        return load_request(path);
    }
    let Some(url) = &cli.url else {
        info!("no request given, running the demonstration request");
        return Ok(demo_request());
    };
    let suggestions = cli
        .suggestions
        .iter()
        .map(String::as_str)
        .map(parse_suggestion)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ChangeRequest {
        url: url.clone(),
        suggestions,
    })
}

fn parse_suggestion(raw: &str) -> Result<Suggestion, Error> {
    let (current, new) = raw.split_once(SUGGESTION_SEPARATOR).ok_or_else(|| {
        Error::Config(format!(
            "suggestion {raw:?} must look like CURRENT{SUGGESTION_SEPARATOR}NEW"
        ))
    })?;
    Ok(Suggestion::new(current.trim(), new.trim()))
}

fn demo_request() -> ChangeRequest {
    ChangeRequest {
        url: "https://fibr.ai/".to_string(),
        suggestions: vec![
            Suggestion::new(
                "Turn Your Website Into a Smart, Self-Optimizing Growth Machine",
                "Boost Conversions 30%+ With AI-Powered Website Optimization",
            ),
            Suggestion::new(
                "Run 100x more experiments, 10x faster with AI Agents that automate testing \
                 & personalization. No extra hires, no agencies, no new tools. Just smarter \
                 conversions, on autopilot.",
                "Our AI Agents deliver 55% higher conversion rates by running 100x more \
                 experiments automatically - no extra hires, agencies, or tools needed.",
            ),
            Suggestion::new("Talk to CRO Expert", "Get Your CRO Analysis"),
        ],
    }
}
