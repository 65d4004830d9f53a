mod server;

use std::fmt;
use std::sync::Arc;

use log::info;
use repl::{Interpreter, LineConsole};
use services::{Clock, QuizService};
use storage::repository::Storage;
use tokio::io::BufReader;
use tokio::net::TcpListener;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidBindAddr { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidBindAddr { raw } => write!(f, "invalid --bind value: {raw}"),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Repl,
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "repl" => Some(Self::Repl),
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    memory: bool,
    bind: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quizzes.sqlite3".into(), normalize_sqlite_url);
        let mut memory = false;
        let mut bind = std::env::var("QUIZ_BIND").unwrap_or_else(|_| "127.0.0.1:7878".into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--memory" => {
                    memory = true;
                }
                "--bind" => {
                    let value = require_value(args, "--bind")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidBindAddr { raw: value });
                    }
                    bind = value;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            memory,
            bind,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- repl  [--db <sqlite_url>] [--memory]");
    eprintln!("  cargo run -p app -- serve [--db <sqlite_url>] [--memory] [--bind <addr>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quizzes.sqlite3");
    eprintln!("  --bind 127.0.0.1:7878");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_BIND");
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: local REPL when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Repl,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Repl,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    let storage = if parsed.memory {
        Storage::in_memory()
    } else {
        prepare_sqlite_file(&parsed.db_url)?;
        Storage::sqlite(&parsed.db_url).await?
    };

    let clock = Clock::default_clock();
    let quizzes = QuizService::new(clock, Arc::clone(&storage.quizzes));

    match cmd {
        Command::Repl => {
            let console =
                LineConsole::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                    .with_color(true);
            let mut interpreter = Interpreter::new(console, quizzes);
            interpreter.run().await?;
            Ok(())
        }
        Command::Serve => {
            let listener = TcpListener::bind(&parsed.bind).await?;
            info!("listening on {}", parsed.bind);
            server::run(listener, quizzes, tokio::signal::ctrl_c()).await;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
