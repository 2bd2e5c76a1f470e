mod config;
mod error;
mod game_id;
mod game_log;
mod log_entry;
mod render;
mod session;
mod store;
mod substrate;
mod tab_resolver;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Command, Config};
use error::GameLogError;
use log::{debug, error, LevelFilter};
use log_entry::EntryId;
use session::GameSession;
use simple_logger::SimpleLogger;
use std::io::{self, Write};
use store::GameLogStore;
use substrate::{FileSubstrate, Substrate};
use tab_resolver::TabResolver;
use tokio::io::AsyncReadExt;

const EXIT_USAGE: i32 = 1;
const EXIT_WRONG_CONTEXT: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default so command output stays readable; RUST_LOG raises it.
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .context("Failed to initialise logging")?;

    let cli = config::Cli::parse();
    let config = config::load_config(&cli)?;
    debug!("Configuration: {:?}", config);

    let substrate = FileSubstrate::open(&config.storage_dir).with_context(|| {
        format!("Failed to open storage directory {:?}", config.storage_dir)
    })?;
    let mut session = GameSession::new(GameLogStore::new(substrate), config.tab_resolver());

    let mut out = io::stdout().lock();
    if let Err(e) = run(cli.command, &mut session, &config, &mut out).await {
        match e.downcast_ref::<GameLogError>() {
            Some(err) if err.is_wrong_context() => {
                debug!("Wrong context: {}", err);
                render::render_wrong_context(&mut out)?;
                std::process::exit(EXIT_WRONG_CONTEXT);
            }
            Some(GameLogError::EmptyInput) => {
                error!("A log entry is required!");
                std::process::exit(EXIT_USAGE);
            }
            _ => return Err(e),
        }
    }

    Ok(())
}

async fn run<S, R, W>(
    command: Command,
    session: &mut GameSession<S, R>,
    config: &Config,
    out: &mut W,
) -> Result<()>
where
    S: Substrate,
    R: TabResolver,
    W: Write,
{
    match command {
        Command::Show => {
            let log = session.open().await?;
            render::render_log(out, &log, &config.date_format)?;
        }

        Command::Add { text, stdin } => {
            let text = if stdin {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("Failed to read note from stdin")?;
                buffer.trim_end_matches('\n').to_string()
            } else {
                text.join(" ")
            };

            let log = session.submit(&text).await?;
            render::render_log(out, &log, &config.date_format)?;
        }

        Command::Remove { position, id } => {
            let log = match (id, position) {
                (Some(id), _) => {
                    let id: EntryId = id
                        .parse()
                        .with_context(|| format!("Invalid entry id: {}", id))?;
                    session.delete_by_id(id).await?
                }
                (None, Some(position)) => session.delete_at_display(position).await?,
                (None, None) => anyhow::bail!("Either a position or --id is required"),
            };
            render::render_log(out, &log, &config.date_format)?;
        }

        Command::Games => {
            let ids = session.store().game_ids()?;
            render::render_game_ids(out, &ids)?;
        }
    }

    out.flush()?;
    Ok(())
}
