//! Planwise CLI - goal progress, task prioritization and date display.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use planwise_core::{CanonicalValue, Goal, TaskRecord};
use planwise_datetime::{
    format, local_to_utc, local_to_utc_naive, resolve_zone, utc_to_local, DatePattern,
    DateTimeFormatter, DisplayPreferences, JsonFilePreferenceStore, TimePattern,
};
use planwise_priority::{ClassifierConfig, EisenhowerMatrix, MatrixEntry, PriorityClassifier, Quadrant};
use planwise_progress::summarize;

#[derive(Parser)]
#[command(name = "planwise")]
#[command(about = "Goal progress, task prioritization and date display", long_about = None)]
struct Cli {
    /// Display preference file
    #[arg(long, global = true, default_value = ".planwise/preferences.json")]
    prefs: PathBuf,

    /// IANA time zone of the viewer
    #[arg(long, global = true, default_value = "UTC")]
    tz: String,

    /// Evaluate as of this instant instead of the current time
    #[arg(long, global = true)]
    now: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show weighted progress for a goal or a list of goals
    Progress {
        /// JSON file holding a goal object or an array of goals
        file: PathBuf,
    },
    /// Classify tasks into Eisenhower quadrants
    Classify {
        /// JSON file holding an array of tasks
        file: PathBuf,
        /// Days after today that still count as urgent
        #[arg(long, default_value = "0")]
        horizon_days: i64,
    },
    /// Group tasks into the Eisenhower matrix
    Matrix {
        /// JSON file holding an array of tasks
        file: PathBuf,
        /// Days after today that still count as urgent
        #[arg(long, default_value = "0")]
        horizon_days: i64,
    },
    /// Render a canonical date for display
    FormatDate {
        /// Canonical ISO-8601 date or date-time
        value: String,
        /// Date pattern, defaults to the saved preference
        #[arg(long)]
        pattern: Option<DatePattern>,
        /// Include the time of day for date-time values
        #[arg(long)]
        with_time: bool,
    },
    /// Parse a display date back to canonical form
    ParseDate {
        /// Display text
        text: String,
        /// Date pattern, defaults to the saved preference
        #[arg(long)]
        pattern: Option<DatePattern>,
    },
    /// Render a 24-hour HH:MM time for display
    FormatTime {
        /// Time as HH:MM
        time: String,
        /// Time pattern, defaults to the saved preference
        #[arg(long)]
        pattern: Option<TimePattern>,
    },
    /// Parse a display time back to 24-hour HH:MM
    ParseTime {
        /// Display text
        text: String,
        /// Time pattern, defaults to the saved preference
        #[arg(long)]
        pattern: Option<TimePattern>,
    },
    /// Convert a local wall-clock value in --tz to UTC
    ToUtc {
        /// Local date or date-time
        local: String,
    },
    /// Convert a UTC value to wall-clock time in --tz
    ToLocal {
        /// UTC date-time
        utc: String,
    },
    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences
    Show,
    /// Save new preferences
    Set {
        /// Date pattern
        #[arg(long)]
        date_format: Option<DatePattern>,
        /// Time pattern
        #[arg(long)]
        time_format: Option<TimePattern>,
    },
}

/// Progress input: one goal or many.
#[derive(Deserialize)]
#[serde(untagged)]
enum GoalInput {
    Many(Vec<Goal>),
    One(Goal),
}

impl GoalInput {
    fn into_goals(self) -> Vec<Goal> {
        match self {
            Self::Many(goals) => goals,
            Self::One(goal) => vec![goal],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let formatter = DateTimeFormatter::new(JsonFilePreferenceStore::new(&cli.prefs));

    match cli.command {
        Commands::Progress { file } => {
            let goals = load_json::<GoalInput>(&file)?.into_goals();
            let prefs = formatter.preferences().await;

            if cli.json {
                let summaries: Vec<_> = goals
                    .iter()
                    .map(|goal| {
                        serde_json::json!({
                            "goal_id": goal.id,
                            "title": goal.title,
                            "progress": summarize(goal),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&summaries)?);
                return Ok(());
            }

            for goal in &goals {
                let progress = summarize(goal);
                let next_due = progress
                    .next_due
                    .map(|d| format!(", next due {}", format::render_date(d, prefs.date_format)))
                    .unwrap_or_default();
                println!(
                    "{} | {}% | {}/{} milestones done{}",
                    display_title(&goal.title, goal.id.as_str()),
                    progress.percentage,
                    progress.completed_milestones,
                    progress.total_milestones,
                    next_due,
                );
            }
        }
        Commands::Classify { file, horizon_days } => {
            let tasks = load_json::<Vec<TaskRecord>>(&file)?;
            let now = resolve_now(cli.now.as_deref(), &cli.tz)?;
            let classifier = PriorityClassifier::new().with_config(ClassifierConfig { horizon_days });

            let entries: Vec<MatrixEntry> = tasks
                .iter()
                .map(|task| MatrixEntry::new(&classifier, task, &now))
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            for entry in &entries {
                println!(
                    "{} {:<9} | {:?} | {}",
                    entry.quadrant.id(),
                    entry.quadrant.as_label(),
                    entry.urgency,
                    display_title(&entry.title, entry.task_id.as_str()),
                );
            }
        }
        Commands::Matrix { file, horizon_days } => {
            let tasks = load_json::<Vec<TaskRecord>>(&file)?;
            let now = resolve_now(cli.now.as_deref(), &cli.tz)?;
            let classifier = PriorityClassifier::new().with_config(ClassifierConfig { horizon_days });
            let matrix = EisenhowerMatrix::build(&classifier, &tasks, &now);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
                return Ok(());
            }

            let prefs = formatter.preferences().await;
            for quadrant in Quadrant::ALL {
                let bucket = matrix.bucket(quadrant);
                println!("Q{} {} ({})", quadrant.id(), quadrant.as_label(), bucket.len());
                for entry in bucket {
                    let due = entry
                        .due
                        .map(|d| format::render_date(d, prefs.date_format))
                        .unwrap_or_else(|| "-".to_string());
                    println!("  {} | {}", due, display_title(&entry.title, entry.task_id.as_str()));
                }
            }
        }
        Commands::FormatDate { value, pattern, with_time } => {
            let prefs = formatter.preferences().await;
            let date_format = pattern.unwrap_or(prefs.date_format);
            let rendered = if with_time {
                format::format_datetime(&value, date_format, prefs.time_format)
            } else {
                format::format_date(&value, date_format)
            };
            println!("{rendered}");
        }
        Commands::ParseDate { text, pattern } => {
            let pattern = match pattern {
                Some(p) => p,
                None => formatter.preferences().await.date_format,
            };
            let Some(canonical) = format::parse_display_date_canonical(&text, pattern) else {
                bail!("{text:?} is not a valid {pattern} date");
            };
            println!("{canonical}");
        }
        Commands::FormatTime { time, pattern } => {
            let pattern = match pattern {
                Some(p) => p,
                None => formatter.preferences().await.time_format,
            };
            println!("{}", format::format_time(&time, pattern));
        }
        Commands::ParseTime { text, pattern } => {
            let pattern = match pattern {
                Some(p) => p,
                None => formatter.preferences().await.time_format,
            };
            let Some(time) = format::parse_display_time(&text, pattern) else {
                bail!("{text:?} is not a valid {pattern} time");
            };
            println!("{time}");
        }
        Commands::ToUtc { local } => {
            println!("{}", local_to_utc(&local, &cli.tz));
        }
        Commands::ToLocal { utc } => {
            println!("{}", utc_to_local(&utc, &cli.tz));
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => {
                let prefs = formatter.preferences().await;
                print_prefs(&prefs, cli.json)?;
            }
            PrefsAction::Set { date_format, time_format } => {
                let current = formatter.preferences().await;
                let prefs = DisplayPreferences::new(
                    date_format.unwrap_or(current.date_format),
                    time_format.unwrap_or(current.time_format),
                );
                formatter
                    .update_preferences(prefs)
                    .await
                    .with_context(|| format!("Failed to save {}", cli.prefs.display()))?;
                print_prefs(&formatter.preferences().await, cli.json)?;
            }
        },
    }

    Ok(())
}

/// Read and deserialize a JSON input file.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "Loaded input");
    Ok(value)
}

/// The evaluation instant, viewed in `zone`.
///
/// `now` may be any canonical value; zone-less values are read as wall-clock
/// time in `zone`.
fn resolve_now(now: Option<&str>, zone: &str) -> Result<DateTime<Tz>> {
    let tz = resolve_zone(zone).unwrap_or_else(|| {
        warn!(zone, "Unknown time zone, using UTC");
        Tz::UTC
    });

    let instant = match now {
        None => Utc::now(),
        Some(text) => match text.parse::<CanonicalValue>().context("Invalid --now value")? {
            CanonicalValue::DateTime(dt) => dt.with_timezone(&Utc),
            value => local_to_utc_naive(value.naive_local(), zone),
        },
    };

    Ok(instant.with_timezone(&tz))
}

fn display_title<'a>(title: &'a str, id: &'a str) -> &'a str {
    if title.trim().is_empty() {
        id
    } else {
        title
    }
}

fn print_prefs(prefs: &DisplayPreferences, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(prefs)?);
    } else {
        println!("Date format: {}", prefs.date_format);
        println!("Time format: {}", prefs.time_format);
    }
    Ok(())
}
