//! chanfs command-line front end.
//!
//! Thin glue around the adapter: opens the SQLite message database,
//! builds a [`ChannelFs`], and drives its operations from subcommands.
//! Also carries `ingest` for appending JSON-lines messages, standing in
//! for the external ingestion pipeline.
//!
//! ```bash
//! chanfs --db messages.db ls
//! chanfs --db messages.db cat '/#general.txt'
//! chanfs --db messages.db stat '/#general.txt'
//! chanfs --db messages.db read '/#general.txt' --offset 0 --size 64
//! chanfs --db messages.db ingest backlog.jsonl
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chanfs_store::{MessageRecord, SqliteStore};
use chanfs_vfs::{ChannelFs, FileType, FsOps};

#[derive(Parser)]
#[command(name = "chanfs", about = "Browse a message store as a virtual filesystem")]
struct Cli {
    /// Path to the SQLite message database.
    #[arg(long)]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List directory entries at a virtual path.
    Ls {
        #[arg(default_value = "/")]
        path: PathBuf,
    },
    /// Print the full contents of a channel file.
    Cat { path: PathBuf },
    /// Show synthesized attributes for a path.
    Stat { path: PathBuf },
    /// Read a byte range from a channel file.
    Read {
        path: PathBuf,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 4096)]
        size: u32,
    },
    /// Append JSON-lines messages to the database.
    ///
    /// One object per line: {"channel": "...", "ts": 1.5,
    /// "user"|"bot": "...", "text": "..."}.
    Ingest { file: PathBuf },
}

/// One line of the ingest format.
#[derive(Debug, Deserialize)]
struct IngestLine {
    channel: String,
    #[serde(flatten)]
    record: MessageRecord,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = Arc::new(
        SqliteStore::open(&cli.db)
            .with_context(|| format!("opening database {}", cli.db.display()))?,
    );
    let fs = ChannelFs::new(store.clone());

    match cli.command {
        Command::Ls { path } => {
            for entry in fs.readdir(&path).await.map_err(std::io::Error::from)? {
                let marker = match entry.kind {
                    FileType::Directory => "d",
                    FileType::File => "-",
                };
                println!("{marker} {}", entry.name);
            }
        }
        Command::Cat { path } => {
            let content = fs.read_all(&path).await.map_err(std::io::Error::from)?;
            std::io::stdout().write_all(&content)?;
            println!();
        }
        Command::Stat { path } => {
            let attr = fs.getattr(&path).await.map_err(std::io::Error::from)?;
            let kind = match attr.kind {
                FileType::Directory => "directory",
                FileType::File => "regular file",
            };
            println!("path:  {}", path.display());
            println!("kind:  {kind}");
            println!("ino:   {}", attr.ino);
            println!("size:  {}", attr.size);
            println!("perm:  {:o}", attr.perm);
            println!("nlink: {}", attr.nlink);
        }
        Command::Read { path, offset, size } => {
            let data = fs
                .read(&path, offset, size)
                .await
                .map_err(std::io::Error::from)?;
            std::io::stdout().write_all(&data)?;
            println!();
        }
        Command::Ingest { file } => {
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("opening {}", file.display()))?,
            );
            let mut count = 0usize;
            for (lineno, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let parsed: IngestLine = serde_json::from_str(&line)
                    .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
                store.append_message(&parsed.channel, &parsed.record)?;
                count += 1;
            }
            tracing::info!(count, db = %cli.db.display(), "ingested messages");
            println!("ingested {count} messages");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_line_with_user() {
        let line: IngestLine =
            serde_json::from_str(r#"{"channel": "general", "ts": 1.5, "user": "alice", "text": "hi"}"#)
                .unwrap();
        assert_eq!(line.channel, "general");
        assert_eq!(line.record.sender(), Some("alice"));
    }

    #[test]
    fn ingest_line_with_bot() {
        let line: IngestLine =
            serde_json::from_str(r#"{"channel": "ops", "ts": 2.0, "bot": "hookbot", "text": "deployed"}"#)
                .unwrap();
        assert_eq!(line.record.bot.as_deref(), Some("hookbot"));
        assert!(line.record.user.is_none());
    }

    #[test]
    fn ingest_line_missing_text_rejected() {
        let result: Result<IngestLine, _> =
            serde_json::from_str(r#"{"channel": "general", "ts": 1.0}"#);
        assert!(result.is_err());
    }
}
