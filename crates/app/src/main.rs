use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lifeskills_core::model::QuizSettings;
use services::{QuestionBank, QuizLoop};
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, build_app_context};

const DEFAULT_LOG_FILTER: &str = "app=info,services=info";
const DELAY_ENV: &str = "LIFESKILLS_ADVANCE_DELAY_MS";
const SEED_ENV: &str = "LIFESKILLS_SEED";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDelay { raw: String },
    InvalidSeed { raw: String },
    Settings(lifeskills_core::Error),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid advance delay: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid seed: {raw}"),
            ArgsError::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--advance-delay-ms <ms>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --advance-delay-ms 300   (0..=5000)");
    eprintln!("  --seed                   random each launch");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {DELAY_ENV}, {SEED_ENV}, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(QuizSettings),
    Help,
}

fn parse_delay(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidDelay { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

/// Environment first, then flags; the last value wins.
fn parse_args(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Command, ArgsError> {
    let mut delay_ms = env(DELAY_ENV)
        .map(parse_delay)
        .transpose()?
        .unwrap_or(QuizSettings::DEFAULT_ADVANCE_DELAY_MS);
    let mut seed = env(SEED_ENV).map(parse_seed).transpose()?;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--advance-delay-ms" => {
                delay_ms = parse_delay(require_value(&mut args, "--advance-delay-ms")?)?;
            }
            "--seed" => seed = Some(parse_seed(require_value(&mut args, "--seed")?)?),
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let settings = QuizSettings::new(delay_ms, seed)
        .map_err(|err| ArgsError::Settings(err.into()))?;
    Ok(Command::Run(settings))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let command = parse_args(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| print_usage())?;
    let settings = match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Run(settings) => settings,
    };

    init_tracing();
    info!(
        advance_delay_ms = settings.advance_delay_ms(),
        seed = ?settings.shuffle_seed(),
        "launching quiz"
    );

    let runtime = Handle::current();
    let quiz = Arc::new(QuizLoop::from_settings(
        QuestionBank::builtin(),
        &settings,
        runtime.clone(),
    ));
    let context = build_app_context(quiz, runtime);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Life Skills Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        // Binary glue: print once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
