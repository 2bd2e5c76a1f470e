use crate::render::DEFAULT_DATE_FORMAT;
use crate::tab_resolver::{ConfiguredTabResolver, FileTabResolver, FixedTabResolver};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Parser, Debug)]
#[clap(name = "np-gamelog", version, about)]
pub struct Cli {
    /// Path to configuration file
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override directory holding the game logs
    #[clap(long)]
    pub storage_dir: Option<PathBuf>,

    /// URL of the active game tab
    #[clap(long)]
    pub url: Option<String>,

    /// File containing the URL of the active game tab
    #[clap(long)]
    pub tab_file: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the notes for the active game, newest first
    Show,

    /// Add a note to the active game
    Add {
        /// Note text; words are joined with spaces
        text: Vec<String>,

        /// Read the note from standard input instead
        #[clap(long, conflicts_with = "text")]
        stdin: bool,
    },

    /// Delete a note by its position in `show` output, or by id
    Remove {
        /// Position as listed by `show` (1 is the newest)
        #[clap(required_unless_present = "id")]
        position: Option<usize>,

        /// Entry id
        #[clap(long, conflicts_with = "position")]
        id: Option<String>,
    },

    /// List the games that have notes
    Games,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub tab_url: Option<String>,
    pub tab_file: Option<PathBuf>,
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./gamelogs"),
            tab_url: None,
            tab_file: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// An explicit URL wins over a tab file.
    pub fn tab_resolver(&self) -> ConfiguredTabResolver {
        match (&self.tab_url, &self.tab_file) {
            (None, Some(path)) => ConfiguredTabResolver::File(FileTabResolver::new(path)),
            (url, _) => ConfiguredTabResolver::Fixed(FixedTabResolver::new(url.clone())),
        }
    }
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if !cli.config.exists() && cli.config == PathBuf::from(DEFAULT_CONFIG_PATH) {
        info!("No config file at {:?}, using defaults", cli.config);
        Config::default()
    } else {
        let config_content = fs::read_to_string(&cli.config)
            .with_context(|| format!("Failed to read config file: {:?}", cli.config))?;
        Config::from_toml(&config_content)?
    };

    // Apply CLI overrides
    if let Some(ref storage_dir) = cli.storage_dir {
        config.storage_dir = storage_dir.clone();
    }

    if let Some(ref url) = cli.url {
        config.tab_url = Some(url.clone());
    }

    if let Some(ref tab_file) = cli.tab_file {
        config.tab_file = Some(tab_file.clone());
        if cli.url.is_none() {
            config.tab_url = None;
        }
    }

    Ok(config)
}
