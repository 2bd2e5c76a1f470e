use crate::error::{GameLogError, Result};
use log::debug;
use std::future::Future;
use std::path::PathBuf;

/// One-shot lookup of the URL of the tab the user is looking at.
pub trait TabResolver {
    fn active_tab_url(&self) -> impl Future<Output = Result<String>> + Send;
}

/// A URL known up front, from the command line or the config file.
#[derive(Debug, Clone)]
pub struct FixedTabResolver {
    url: Option<String>,
}

impl FixedTabResolver {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

impl TabResolver for FixedTabResolver {
    async fn active_tab_url(&self) -> Result<String> {
        self.url
            .clone()
            .ok_or_else(|| GameLogError::TabUnavailable("no tab URL configured".to_string()))
    }
}

/// Reads the URL from a file kept current by the browser host.
#[derive(Debug, Clone)]
pub struct FileTabResolver {
    path: PathBuf,
}

impl FileTabResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabResolver for FileTabResolver {
    async fn active_tab_url(&self) -> Result<String> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GameLogError::TabUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let url = content.trim();
        if url.is_empty() {
            return Err(GameLogError::TabUnavailable(format!(
                "{} is empty",
                self.path.display()
            )));
        }
        debug!("Active tab URL from {}: {}", self.path.display(), url);
        Ok(url.to_string())
    }
}

/// Resolver picked from configuration at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredTabResolver {
    Fixed(FixedTabResolver),
    File(FileTabResolver),
}

impl TabResolver for ConfiguredTabResolver {
    async fn active_tab_url(&self) -> Result<String> {
        match self {
            ConfiguredTabResolver::Fixed(r) => r.active_tab_url().await,
            ConfiguredTabResolver::File(r) => r.active_tab_url().await,
        }
    }
}
