//! Scrivener host binary.
//!
//! Usage:
//!   # Serve JSON-lines tool calls on stdio against an in-memory registry
//!   scrivener serve --session p1 --snapshot files.json --export out.json
//!
//!   # Advertise the tool catalogue
//!   scrivener tools
//!
//!   # Numbered line diff of two files
//!   scrivener diff old.ts new.ts

mod host;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use scrivener_kernel::{EngineConfig, SessionKey, SessionRegistry, Snapshot, ToolCall, ToolExecutor};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

/// In-memory workspace engine for agent tool calls.
#[derive(Parser, Debug)]
#[command(name = "scrivener")]
#[command(about = "Virtual workspace patch engine")]
struct Args {
    /// Engine config (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read tool calls from stdin, one JSON object per line
    Serve {
        /// Session key for requests that don't name one (default: fresh UUIDv7)
        #[arg(long)]
        session: Option<String>,

        /// JSON snapshot to seed the session with
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write the session's files here as JSON on EOF
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print every tool with its input schema
    Tools,

    /// Print a numbered line diff between two files
    Diff { old: PathBuf, new: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries responses; logs go to stderr
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Serve {
            session,
            snapshot,
            export,
        } => serve(config, session, snapshot, export).await,
        Command::Tools => {
            let catalogue = ToolCall::catalogue();
            println!("{}", serde_json::to_string_pretty(&catalogue)?);
            Ok(())
        }
        Command::Diff { old, new } => {
            let old_text = read_text(&old)?;
            let new_text = read_text(&new)?;
            print!("{}", render_diff(&old_text, &new_text, config.max_diff_cells)?);
            Ok(())
        }
    }
}

async fn serve(
    config: EngineConfig,
    session: Option<String>,
    snapshot: Option<PathBuf>,
    export: Option<PathBuf>,
) -> Result<()> {
    let registry = Arc::new(SessionRegistry::from_config(config));
    let key = session.map(SessionKey::new).unwrap_or_else(SessionKey::generate);

    if let Some(path) = &snapshot {
        let snapshot: Snapshot = serde_json::from_str(&read_text(path)?)
            .with_context(|| format!("parsing snapshot {}", path.display()))?;
        registry.seed(&key, snapshot);
    }

    let exec = ToolExecutor::new(registry.clone());
    tracing::info!(session = %key, ?registry, "scrivener ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let Some(response) = host::handle_line(&exec, &key, &line) else {
            continue;
        };
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await.context("writing stdout")?;
        stdout.flush().await?;
    }

    if let Some(path) = &export {
        let files = registry.with_session(&key, |session| session.export());
        std::fs::write(path, serde_json::to_string_pretty(&files)?)
            .with_context(|| format!("writing export {}", path.display()))?;
        tracing::info!(files = files.len(), path = %path.display(), "exported session");
    }

    tracing::info!("scrivener shutting down");
    Ok(())
}

/// Numbered diff of two texts, refusing tables larger than `max_cells`.
fn render_diff(old_text: &str, new_text: &str, max_cells: usize) -> Result<String> {
    let lines = scrivener_kernel::diff::bounded_diff(old_text, new_text, max_cells).with_context(|| {
        format!(
            "files too large to diff ({} cells, max_diff_cells = {max_cells})",
            scrivener_kernel::diff::table_cells(old_text, new_text),
        )
    })?;
    Ok(scrivener_kernel::diff::render_unified(&lines))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diff_within_limit() {
        let out = render_diff("a\nb", "a\nc", 100).unwrap();
        assert!(out.contains("- b"));
        assert!(out.contains("+ c"));
    }

    #[test]
    fn test_render_diff_refuses_oversized_table() {
        let err = render_diff("a\nb", "a\nc", 8).unwrap_err();
        assert!(err.to_string().contains("too large to diff"));
    }
}
