//! Manaweave Engine - command line host.
//!
//! Reads a JSON session from the path given as the first argument (or stdin
//! when no path is given), runs it, and prints the report as JSON.

use std::io::Read;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use manaweave_engine::infrastructure::config::{log_filter_from_env, EngineConfig};
use manaweave_engine::session::{run_session, Session};
use manaweave_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter_from_env().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env();
    tracing::info!(
        advanced_unlock_tier = %config.progression.advanced_unlock_tier,
        mana_rounding = config.crafting.mana_rounding.key(),
        "Starting Manaweave Engine"
    );

    let input = read_input(std::env::args().nth(1))?;
    let session: Session =
        serde_json::from_str(&input).context("Session input is not valid JSON")?;

    let app = App::in_memory(config);
    let report = run_session(&app, session).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file {path}")),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read session from stdin")?;
            Ok(input)
        }
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
