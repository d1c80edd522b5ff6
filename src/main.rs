use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::oneshot;
use tracing::{info, warn};
use uuid::Uuid;

mod chat;
mod classifier;
mod config;
mod dashboard;
mod db;
mod error;
mod flashcards;
mod insights;
mod logging;
mod models;
mod pending;
mod quiz;
mod report;
mod summary;

use config::Config;
use models::{CardStatus, LearningStyle, RawMetrics};

#[derive(Parser)]
#[command(name = "learning-style-advisor")]
#[command(about = "Rule-based learning style analysis and study tools", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Owner identity for stored analyses (overrides ADVISOR_USER_ID)
    #[arg(long, global = true)]
    user_id: Option<String>,
    /// Owner email (overrides ADVISOR_USER_EMAIL)
    #[arg(long, global = true)]
    user_email: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["text", "file"])
        .required(true)
        .multiple(false)
))]
struct TextSource {
    /// Text to process
    #[arg(long)]
    text: Option<String>,
    /// File containing the text to process
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load demo analyses for the current owner
    Seed,
    /// Classify and store every row of a metrics CSV
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Classify a student's study metrics
    Analyze {
        #[arg(long)]
        name: Option<String>,
        /// Weekly study hours
        #[arg(long)]
        time_spent: Option<String>,
        /// Quiz score between 0 and 100
        #[arg(long)]
        quiz_score: Option<String>,
        #[arg(long, default_value = "1")]
        attempts: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        engagement: Option<String>,
        /// Study regularity between 1 and 10
        #[arg(long)]
        consistency: Option<String>,
        /// Print the result without storing it
        #[arg(long)]
        no_save: bool,
    },
    /// List stored analyses, newest first
    List {
        #[arg(long, default_value_t = db::MAX_LISTED)]
        limit: usize,
    },
    /// Delete a stored analysis
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Write the dashboard as a markdown report
    Dashboard {
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Ask the study assistant a question
    Chat {
        #[arg(long)]
        message: String,
        /// Learning style to answer for (defaults to the latest stored analysis)
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Generate flashcards from notes
    Flashcards {
        #[command(flatten)]
        source: TextSource,
        #[arg(long)]
        style: Option<String>,
        /// Walk through the deck interactively
        #[arg(long)]
        review: bool,
        #[arg(long)]
        json: bool,
    },
    /// Summarize notes for a learning style
    Summarize {
        #[command(flatten)]
        source: TextSource,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Take a multiple choice study-skills quiz
    Quiz {
        #[arg(long, default_value_t = quiz::DEFAULT_QUESTION_COUNT)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    let mut config = Config::from_env()?;
    if cli.user_id.is_some() {
        config.user_id = cli.user_id;
    }
    if cli.user_email.is_some() {
        config.user_email = cli.user_email;
    }

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let owner = config.owner()?;
            let pool = connect(&config).await?;
            let inserted = db::seed(&pool, &owner).await?;
            println!("Seeded {inserted} analyses for {}.", owner.email);
        }
        Commands::Import { csv } => {
            let owner = config.owner()?;
            let pool = connect(&config).await?;
            let summary = db::import_csv(&pool, &owner, &csv).await?;
            println!(
                "Imported {} analyses from {} ({} rows skipped).",
                summary.inserted,
                csv.display(),
                summary.skipped
            );
        }
        Commands::Analyze {
            name,
            time_spent,
            quiz_score,
            attempts,
            engagement,
            consistency,
            no_save,
        } => {
            let raw = RawMetrics {
                name,
                time_spent,
                quiz_score,
                attempts,
                engagement,
                consistency,
            };
            let metrics = raw.parse()?;

            let Some(style) = run_pending(&config, || classifier::classify(&metrics)).await else {
                println!("Analysis cancelled.");
                return Ok(());
            };

            if no_save {
                info!(style = %style, "analysis not stored");
            } else {
                let owner = config.owner()?;
                let pool = connect(&config).await?;
                let record = db::insert_analysis(&pool, &owner, &metrics, style).await?;
                println!("Saved analysis {}.", record.id);
            }

            print_result(&metrics, style);
        }
        Commands::List { limit } => {
            let owner = config.owner()?;
            let pool = connect(&config).await?;
            let records = db::list_analyses(&pool, &owner, limit).await?;

            if records.is_empty() {
                println!("No analyses stored yet.");
                return Ok(());
            }

            for record in records.iter() {
                println!(
                    "- {} {} ({}) score {:.0}, {:.1} hrs, {} attempts, {} engagement, consistency {:.0}/10, {}",
                    record.id,
                    record.metrics.name,
                    record.learning_style,
                    record.metrics.quiz_score,
                    record.metrics.time_spent,
                    record.metrics.attempts,
                    record.metrics.engagement.as_str(),
                    record.metrics.consistency,
                    record.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Delete { id } => {
            let owner = config.owner()?;
            let pool = connect(&config).await?;
            db::delete_analysis(&pool, &owner, id).await?;
            println!("Deleted analysis {id}.");
        }
        Commands::Dashboard { out } => {
            let owner = config.owner()?;
            let pool = connect(&config).await?;
            let records = db::list_analyses(&pool, &owner, db::MAX_LISTED).await?;
            let report = report::build_report(&owner, chrono::Utc::now(), &records);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
        Commands::Chat {
            message,
            style,
            json,
        } => {
            let style = resolve_style(&config, style.as_deref()).await?;
            let Some(reply) = run_pending(&config, || chat::respond(&message, style)).await else {
                println!("Chat cancelled.");
                return Ok(());
            };
            let Some(reply) = reply else {
                println!("{}", chat::greeting(style));
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", reply.text);
                for row in reply.table.iter().flatten() {
                    println!("  {}  {}", row.time, row.activity);
                }
            }
        }
        Commands::Flashcards {
            source,
            style,
            review,
            json,
        } => {
            let text = read_text(&source)?;
            let style = resolve_style(&config, style.as_deref()).await?;
            let Some(cards) = run_pending(&config, || flashcards::extract(&text)).await else {
                println!("Flashcard generation cancelled.");
                return Ok(());
            };

            if cards.is_empty() {
                println!("No flashcards generated.");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else if review {
                review_deck(flashcards::Deck::new(cards))?;
            } else {
                for (index, card) in cards.iter().enumerate() {
                    println!("{}. Q: {}", index + 1, card.front);
                    println!("   A: {}", card.back);
                }
            }
            println!("Tip: {}", flashcards::review_tip(style));
        }
        Commands::Summarize {
            source,
            style,
            out,
        } => {
            let text = read_text(&source)?;
            let style = resolve_style(&config, style.as_deref()).await?;
            let Some(rendered) = run_pending(&config, || summary::summarize(&text, style)).await
            else {
                println!("Summary cancelled.");
                return Ok(());
            };

            if rendered.is_empty() {
                println!("Nothing to summarize.");
                return Ok(());
            }

            match out {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Summary written to {}.", path.display());
                }
                None => println!("{rendered}"),
            }
        }
        Commands::Quiz { count } => {
            run_quiz(count)?;
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config.database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(error::AdvisorError::from)
        .context("failed to connect to Postgres")?;
    Ok(pool)
}

/// Runs `work` behind the configured cosmetic delay; Ctrl-C discards it.
async fn run_pending<T, F>(config: &Config, work: F) -> Option<T>
where
    F: FnOnce() -> T,
{
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(());
        }
    });

    let result = pending::simulate(config.latency(), cancel_rx, work).await;
    watcher.abort();
    result
}

/// An explicit `--style` wins; otherwise the owner's latest analysis, falling
/// back to Average Learner when nothing is stored or storage is unreachable.
async fn resolve_style(config: &Config, explicit: Option<&str>) -> anyhow::Result<LearningStyle> {
    if let Some(label) = explicit {
        return Ok(label.parse()?);
    }

    let (Ok(owner), Some(_)) = (config.owner(), config.database_url.as_deref()) else {
        return Ok(LearningStyle::default());
    };

    let latest = match connect(config).await {
        Ok(pool) => db::latest_style(&pool, &owner).await.map_err(anyhow::Error::from),
        Err(err) => Err(err),
    };

    match latest {
        Ok(style) => Ok(style.unwrap_or_default()),
        Err(err) => {
            warn!(error = %err, "could not load latest learning style");
            Ok(LearningStyle::default())
        }
    }
}

fn read_text(source: &TextSource) -> anyhow::Result<String> {
    match (&source.text, &source.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_file(path),
        (None, None) => Ok(String::new()),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_result(metrics: &models::StudentMetrics, style: LearningStyle) {
    let insight = insights::insights(style);

    println!("{} is a {style}.", metrics.name);
    println!(
        "Based on {:.1} study hrs, consistency {:.0}/10 and a quiz score of {:.0}.",
        metrics.time_spent, metrics.consistency, metrics.quiz_score
    );
    println!();
    println!("Recommended method: {} ({} efficiency)", insight.method, insight.efficiency);
    println!("  {}", insight.method_description);
    println!("Focus: {}", insight.focus);
    println!("Learning path:");
    for (index, step) in insight.path.iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }
    println!("Recommendations:");
    for line in insights::recommendations(style) {
        println!("  - {line}");
    }
    if insights::needs_improvement_tips(style) {
        println!("Study tips:");
        for (title, tip) in insights::STUDY_TIPS.iter() {
            println!("  - {title}: {tip}");
        }
    }
    println!("Resources:");
    for resource in insight.resources.iter() {
        println!("  - {} ({}): {}", resource.title, resource.platform, resource.url);
    }
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    lines.next().transpose().map_err(anyhow::Error::from)
}

fn review_deck(mut deck: flashcards::Deck) -> anyhow::Result<()> {
    if deck.is_empty() {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(card) = deck.current() {
        println!();
        println!("Card {} of {}", deck.position() + 1, deck.len());
        println!("Q: {}", card.front);
        let back = card.back.clone();

        let Some(input) = prompt(&mut lines, "[f]lip [m]astered [r]eview [n]ext [p]rev [q]uit > ")?
        else {
            break;
        };

        match input.trim() {
            "f" => println!("A: {back}"),
            "m" => deck.mark(CardStatus::Mastered),
            "r" => deck.mark(CardStatus::Reviewing),
            "n" => deck.next(),
            "p" => deck.prev(),
            "q" => break,
            other => println!("Unknown command {other:?}."),
        }
    }

    let stats = deck.stats();
    println!(
        "Mastered {} / reviewing {} of {} cards ({:.0}% mastered).",
        stats.mastered,
        stats.reviewing,
        deck.len(),
        deck.progress() * 100.0
    );
    Ok(())
}

fn run_quiz(count: usize) -> anyhow::Result<()> {
    let questions = quiz::pick_questions(count, &mut rand::rng());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, question.question);
        for (option_index, option) in question.options.iter().enumerate() {
            println!("   {}) {}", option_index + 1, option);
        }

        let Some(input) = prompt(&mut lines, "Answer: ")? else {
            break;
        };
        let input = input.trim();
        let selected = input
            .parse::<usize>()
            .ok()
            .and_then(|choice| question.options.get(choice.wrapping_sub(1)))
            .map(|option| option.to_string())
            .unwrap_or_else(|| input.to_string());

        answers.push(quiz::Answer {
            question_id: question.id,
            selected,
        });
    }

    let score = quiz::score(&answers);
    println!();
    println!("Score: {score}/{}", questions.len());
    println!("{}", quiz::verdict(score));

    for answer in answers.iter() {
        if let Some(question) = quiz::find_question(answer.question_id) {
            if question.answer.to_lowercase() != answer.selected.to_lowercase() {
                println!("- {} Correct answer: {}", question.question, question.answer);
            }
        }
    }
    Ok(())
}
