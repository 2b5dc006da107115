use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quest_core::model::{CourseId, LeaderboardEntry, SessionSubmission, StudentId};
use services::{AppServices, Clock, RemoteConfig, StatsGateway};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quest.sqlite3";
const DEFAULT_STUDENT: &str = "guest";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStudent { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudent { raw } => write!(f, "invalid --student value: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

struct Args {
    db_url: String,
    remote_url: Option<String>,
    remote_token: Option<String>,
    student: StudentId,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--remote <url>] [--student <id>]");
    eprintln!("  cargo run -p app -- seed  [--db <sqlite_url>] [--student <id>]");
    eprintln!("  cargo run -p app -- stats [--db <sqlite_url>] [--student <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --student {DEFAULT_STUDENT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUEST_DB_URL, QUEST_REMOTE_URL, QUEST_REMOTE_TOKEN, QUEST_STUDENT_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
    Stats,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url =
            non_empty_env("QUEST_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut remote_url = non_empty_env("QUEST_REMOTE_URL");
        let mut remote_token = non_empty_env("QUEST_REMOTE_TOKEN");
        let mut student = non_empty_env("QUEST_STUDENT_ID").unwrap_or_else(|| DEFAULT_STUDENT.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--remote" => remote_url = Some(require_value(args, "--remote")?),
                "--remote-token" => remote_token = Some(require_value(args, "--remote-token")?),
                "--student" => student = require_value(args, "--student")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let trimmed = student.trim();
        if trimmed.is_empty() {
            return Err(ArgsError::InvalidStudent { raw: student });
        }

        Ok(Self {
            db_url,
            remote_url,
            remote_token,
            student: StudentId::new(trimmed),
        })
    }

    fn remote(&self) -> Option<RemoteConfig> {
        self.remote_url.as_ref().map(|base_url| RemoteConfig {
            base_url: base_url.clone(),
            auth_token: self.remote_token.clone(),
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    // Open + migrate SQLite here so services stay free of filesystem concerns.
    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(
        &parsed.db_url,
        parsed.remote(),
        Clock::system(),
        parsed.student.clone(),
    )
    .await?;
    info!(db = %parsed.db_url, student = %parsed.student, ?cmd, "services ready");

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(app);
            let context = build_app_context(&app);

            // Some dev setups default to an always-on-top window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Quest")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => seed(&app).await,
        Command::Stats => {
            let stats = app.stats().fetch_stats(app.student()).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

/// Writes a few finished sessions and leaderboard rows for the selected student.
async fn seed(app: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = app.catalog();
    let clock = Clock::system();
    let name = app.student().to_string();
    let demo = [("fractions", 50, 5, 1, 4), ("space", 35, 4, 2, 3), ("fractions", 65, 6, 0, 6)];

    for (topic, points, correct, wrong, max_streak) in demo {
        let title = catalog
            .get(&CourseId::new(topic))
            .map_or_else(|| topic.to_string(), |course| course.title().to_string());
        let submission = SessionSubmission {
            student_name: name.clone(),
            course_title: title,
            points,
            correct,
            wrong,
            max_streak,
            time_spent_secs: 45,
            completed: true,
            ..SessionSubmission::new(Some(topic))
        };
        let accuracy = submission.accuracy();
        app.stats().submit_session(app.student(), submission).await?;

        let entry = LeaderboardEntry::new(name.as_str(), points, clock.now())
            .with_course(topic)
            .with_accuracy(accuracy);
        let source = app.leaderboard().submit(entry).await?;
        info!(topic, points, ?source, "seeded session");
    }

    eprintln!("seeded {} sessions for {}", demo.len(), app.student());
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
