use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, LogicalSize, WindowBuilder};
use quiz_core::DifficultyPredictor;
use quiz_core::model::{Difficulty, QuizSettings};
use quiz_core::predictor::PredictorError;
use services::{Clock, QuizLoopService};
use storage::dataset::DEFAULT_QUESTIONS_PATH;
use storage::{CsvQuestionSource, QuestionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTotal { raw: String },
    InvalidQuestionsPath { raw: String },
    InvalidThreshold { flag: &'static str, raw: String },
    Thresholds(PredictorError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTotal { raw } => {
                write!(f, "invalid --total value: {raw} (expected a positive integer)")
            }
            ArgsError::InvalidQuestionsPath { raw } => {
                write!(f, "invalid --questions value: {raw:?}")
            }
            ArgsError::InvalidThreshold { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected a number in 0..=1)")
            }
            ArgsError::Thresholds(err) => write!(f, "{err}"),
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

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Debug)]
struct Args {
    questions: PathBuf,
    settings: QuizSettings,
    predictor: DifficultyPredictor,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--questions <csv_path>] [--total <n>]");
    eprintln!("                            [--hard-above <ratio>] [--medium-above <ratio>]");
    eprintln!("  cargo run -p app -- check [--questions <csv_path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --questions {DEFAULT_QUESTIONS_PATH}");
    eprintln!("  --total {}", QuizSettings::DEFAULT_TOTAL_QUESTIONS);
    eprintln!("  --hard-above {}", DifficultyPredictor::DEFAULT_HARD_ABOVE);
    eprintln!("  --medium-above {}", DifficultyPredictor::DEFAULT_MEDIUM_ABOVE);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_QUESTIONS_PATH, QUIZ_TOTAL, QUIZ_HARD_ABOVE, QUIZ_MEDIUM_ABOVE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }

    /// Session tuning flags only make sense when a session is started.
    fn accepts_session_flags(self) -> bool {
        matches!(self, Self::Ui)
    }
}

fn parse_total(raw: String) -> Result<QuizSettings, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|total| QuizSettings::new(total).ok())
        .ok_or(ArgsError::InvalidTotal { raw })
}

fn parse_threshold(flag: &'static str, raw: String) -> Result<f64, ArgsError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ArgsError::InvalidThreshold { flag, raw })
}

impl Args {
    /// Resolve arguments: CLI flags win over environment values, which win
    /// over the built-in defaults. `env` looks up a variable by name.
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let mut questions = lookup("QUIZ_QUESTIONS_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_PATH), PathBuf::from);
        let mut settings = match lookup("QUIZ_TOTAL") {
            Some(value) => parse_total(value)?,
            None => QuizSettings::default(),
        };
        let mut hard_above = match lookup("QUIZ_HARD_ABOVE") {
            Some(value) => parse_threshold("QUIZ_HARD_ABOVE", value)?,
            None => DifficultyPredictor::DEFAULT_HARD_ABOVE,
        };
        let mut medium_above = match lookup("QUIZ_MEDIUM_ABOVE") {
            Some(value) => parse_threshold("QUIZ_MEDIUM_ABOVE", value)?,
            None => DifficultyPredictor::DEFAULT_MEDIUM_ABOVE,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidQuestionsPath { raw: value });
                    }
                    questions = PathBuf::from(value);
                }
                "--total" if cmd.accepts_session_flags() => {
                    settings = parse_total(require_value(args, "--total")?)?;
                }
                "--hard-above" if cmd.accepts_session_flags() => {
                    hard_above =
                        parse_threshold("--hard-above", require_value(args, "--hard-above")?)?;
                }
                "--medium-above" if cmd.accepts_session_flags() => {
                    medium_above =
                        parse_threshold("--medium-above", require_value(args, "--medium-above")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let predictor =
            DifficultyPredictor::new(hard_above, medium_above).map_err(ArgsError::Thresholds)?;

        Ok(Self {
            questions,
            settings,
            predictor,
        })
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the window.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            print_usage();
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("unknown subcommand: {first}"),
            )
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    // The error itself is printed once by `main`.
    let parsed = Args::parse(cmd, &mut iter, |key| std::env::var(key).ok()).map_err(|e| {
        print_usage();
        e
    })?;

    init_tracing();

    let source = CsvQuestionSource::new(parsed.questions);
    let path = source.path().to_path_buf();
    let store = QuestionStore::new(Arc::new(source));

    match cmd {
        Command::Ui => {
            info!(
                path = %path.display(),
                total = parsed.settings.total_questions(),
                hard_above = parsed.predictor.hard_above(),
                medium_above = parsed.predictor.medium_above(),
                "launching quiz window"
            );
            let quiz_loop = Arc::new(
                QuizLoopService::new(Clock::system(), store, parsed.settings)
                    .with_predictor(parsed.predictor),
            );
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Game")
                    .with_inner_size(LogicalSize::new(600.0, 520.0))
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let questions = store.load()?;
            println!("{}: {} questions", path.display(), questions.len());
            for difficulty in Difficulty::ALL {
                let count = questions
                    .iter()
                    .filter(|q| q.difficulty() == difficulty)
                    .count();
                println!("  {:<8}{count}", difficulty.display_name());
            }
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
