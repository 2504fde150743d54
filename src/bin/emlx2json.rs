use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;

use emlx2json::config::{Config, load_config, write_template};
use emlx2json::domain::message::SummarizedMessage;
use emlx2json::{MessageSummary, parse_file_with, summarize};

#[derive(Parser)]
#[command(name = "emlx2json")]
#[command(about = "Convert Apple Mail .emlx messages to JSON", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/emlx2json/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse messages and print them as JSON
    Parse {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long)]
        pretty: bool,

        /// Attach uuid, UTC date, contacts and snippet
        #[arg(long)]
        summary: bool,

        /// Decode nested multipart parts recursively
        #[arg(long)]
        nested: bool,
    },

    /// Print only the derived summaries
    Summary {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// Write a template config file
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::InitConfig { force } => {
            let path = write_template(cli.config.as_deref(), force)?;
            println!("Wrote config template to {}", path.display());
            Ok(())
        }

        Command::Parse {
            paths,
            pretty,
            summary,
            nested,
        } => {
            let mut cfg = load_config(cli.config.as_deref())
                .map_err(|e| anyhow!("Configuration error: {e:#}"))?;
            cfg.pretty |= pretty;
            cfg.summary |= summary;
            cfg.nested_multipart |= nested;

            if cfg.summary {
                let items = paths
                    .iter()
                    .map(|p| -> Result<SummarizedMessage> {
                        let message = parse_file_with(p, &cfg.parse_options())?;
                        let summary = summarize(&message);
                        Ok(SummarizedMessage { message, summary })
                    })
                    .collect::<Result<Vec<_>>>()?;
                emit(&items, &cfg)
            } else {
                let items = paths
                    .iter()
                    .map(|p| parse_file_with(p, &cfg.parse_options()))
                    .collect::<Result<Vec<_>>>()?;
                emit(&items, &cfg)
            }
        }

        Command::Summary { paths, pretty } => {
            let mut cfg = load_config(cli.config.as_deref())
                .map_err(|e| anyhow!("Configuration error: {e:#}"))?;
            cfg.pretty |= pretty;

            let items = paths
                .iter()
                .map(|p| -> Result<MessageSummary> {
                    Ok(summarize(&parse_file_with(p, &cfg.parse_options())?))
                })
                .collect::<Result<Vec<_>>>()?;
            emit(&items, &cfg)
        }
    }
}

/// One path prints a single object, several print an array.
fn emit<T: Serialize>(items: &[T], cfg: &Config) -> Result<()> {
    let json = match items {
        [single] if cfg.pretty => serde_json::to_string_pretty(single)?,
        [single] => serde_json::to_string(single)?,
        many if cfg.pretty => serde_json::to_string_pretty(many)?,
        many => serde_json::to_string(many)?,
    };
    println!("{json}");
    Ok(())
}
