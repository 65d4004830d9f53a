use std::fmt;

use quiz_core::model::QuizDraft;
use quiz_core::time::Clock;
use storage::repository::{NewQuizRecord, QuizRepository, Storage};

const SAMPLE_QUIZZES: &[(&str, &str)] = &[
    ("Capital of France?", "Paris"),
    ("Capital of Italy?", "Rome"),
    ("Capital of Spain?", "Madrid"),
    ("Capital of Portugal?", "Lisbon"),
    ("Capital of Germany?", "Berlin"),
    ("Capital of Austria?", "Vienna"),
    ("Capital of Poland?", "Warsaw"),
    ("Capital of Greece?", "Athens"),
];

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    count: u32,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:quizzes.sqlite3".into());
        let mut count = u32::try_from(SAMPLE_QUIZZES.len()).unwrap_or(u32::MAX);

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--count" => {
                    let value = require_value(&mut args, "--count")?;
                    count = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, count })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [--db <sqlite_url>] [--count <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quizzes.sqlite3");
    eprintln!("  --count {}", SAMPLE_QUIZZES.len());
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let clock = Clock::default_clock();

    let count = (args.count as usize).min(SAMPLE_QUIZZES.len());
    for (question, answer) in &SAMPLE_QUIZZES[..count] {
        let validated = QuizDraft::new(*question, *answer).validate(clock.now())?;
        let quiz = storage
            .quizzes
            .insert_quiz(NewQuizRecord::from_validated(&validated))
            .await?;
        println!("[{}] {} => {}", quiz.id(), quiz.question(), quiz.answer());
    }

    println!("seeded {count} quizzes into {}", args.db_url);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
