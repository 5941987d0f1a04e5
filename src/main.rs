//! tasktree CLI: add tasks and ask which one fits best right now.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use tasktree::core::types::parse_time_of_day;
use tasktree::{Config, NewTask, TaskId, TaskIndex, TaskQuery};

#[derive(Parser)]
#[command(name = "tasktree", version, about = "Per-user KD-Tree task matching")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task and rebuild its owner's index.
    Add(TaskArgs),

    /// List the tasks that best fit a context, nearest first.
    Best {
        #[arg(long)]
        user: String,

        #[command(flatten)]
        context: ContextArgs,

        /// Number of results (defaults to the configured limit).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one task.
    Get { id: u64 },

    /// Remove one task without rebuilding its owner's index.
    Delete { id: u64 },

    /// Replace a task and rebuild the affected indexes.
    Update {
        id: u64,

        #[command(flatten)]
        task: TaskArgs,
    },

    /// Rebuild a user's index from the stored tasks.
    Rebuild {
        #[arg(long)]
        user: String,
    },

    /// List stored tasks.
    List {
        /// Only this user's tasks.
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Args)]
struct TaskArgs {
    #[arg(long)]
    user: String,

    #[command(flatten)]
    context: ContextArgs,
}

#[derive(Args)]
struct ContextArgs {
    /// Time of day: minutes since midnight, or HH:MM.
    #[arg(long, value_parser = parse_time)]
    time: f64,

    #[arg(long)]
    mood: f64,

    #[arg(long)]
    energy: f64,

    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
}

impl ContextArgs {
    fn query(&self) -> TaskQuery {
        TaskQuery {
            time: self.time,
            mood: self.mood,
            energy: self.energy,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl TaskArgs {
    fn into_new_task(self) -> NewTask {
        let c = self.context;
        NewTask {
            user: self.user,
            time: c.time,
            mood: c.mood,
            energy: c.energy,
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

fn parse_time(text: &str) -> std::result::Result<f64, String> {
    parse_time_of_day(text).map_err(|e| e.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let store = config
        .open_store()
        .with_context(|| format!("opening task store in {}", config.data_dir.display()))?;
    let index = TaskIndex::new(store, config);

    match cli.command {
        Commands::Add(task) => print_json(&index.insert(task.into_new_task())?)?,
        Commands::Best { user, context, limit } => {
            let limit = limit.unwrap_or(index.config().best_match_limit);
            print_json(&index.best_match(&user, &context.query(), limit)?)?;
        }
        Commands::Get { id } => print_json(&index.get(TaskId(id))?)?,
        Commands::Delete { id } => {
            index.delete(TaskId(id))?;
            println!("Deleted task {id}");
        }
        Commands::Update { id, task } => print_json(&index.update(TaskId(id), task.into_new_task())?)?,
        Commands::Rebuild { user } => print_json(&index.rebuild(&user)?)?,
        Commands::List { user } => match user {
            Some(user) => print_json(&index.tasks_for_user(&user)?)?,
            None => print_json(&index.all()?)?,
        },
    }

    Ok(())
}
