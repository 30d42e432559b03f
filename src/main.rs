use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use career_signal::config::AppConfig;
use career_signal::replay::{load_records, replay};
use career_signal::store::MemoryStore;
use career_signal::{Engine, LifecyclePolicy, NormalizedEmail};

#[derive(Parser, Debug)]
#[command(
    name = "career-signal",
    about = "Classify career emails and track application lifecycles",
    version
)]
struct Cli {
    /// Pretty-print JSON output (overrides CAREER_SIGNAL_PRETTY)
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one NormalizedEmail JSON document
    Classify(ClassifyArgs),
    /// Classify a JSON Lines export and derive per-thread lifecycles
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Input file; reads stdin when omitted
    path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// JSON Lines file of {"thread_id", "email"} records
    path: PathBuf,
    /// Lifecycle policy: terminal or reopen (overrides CAREER_SIGNAL_LIFECYCLE_POLICY)
    #[arg(long)]
    policy: Option<LifecyclePolicy>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    // Logs go to stderr so stdout carries only JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let pretty = cli.pretty || config.pretty;
    let engine = Engine::new();

    match cli.command {
        Command::Classify(args) => {
            let raw = match &args.path {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    tokio::io::stdin()
                        .read_to_string(&mut buf)
                        .await
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let email: NormalizedEmail =
                serde_json::from_str(&raw).context("input is not a NormalizedEmail document")?;

            match engine.classify(&email) {
                Ok(result) => print_json(&result, pretty)?,
                Err(e) => {
                    eprintln!("error {}: {e}", e.code());
                    std::process::exit(2);
                }
            }
        }
        Command::Replay(args) => {
            let policy = args.policy.unwrap_or(config.lifecycle_policy);
            let records = load_records(&args.path)
                .await
                .with_context(|| format!("failed to load {}", args.path.display()))?;

            let store = MemoryStore::new();
            let summary = replay(&engine, &store, &records, policy).await?;
            print_json(&summary, pretty)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
