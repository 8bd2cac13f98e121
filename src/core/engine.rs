// src/core/engine.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{Config, CONFIG_CANDIDATES};
use crate::error::AnalyzerError;
use super::{Analyzer, Blacklist, BlacklistStore, CallGraph, JsonEmitter};

/// Entry point for callers that host the analyzer: the CLI, or a service
/// exposing `analyze` and blacklist endpoints.
pub struct Engine {
    config: Config,
    blacklist: BlacklistStore,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            blacklist: BlacklistStore::default(),
        }
    }

    /// Create an engine from a config file, loading the configured blacklist
    pub async fn from_config_path(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        debug!("Loaded configuration: {:?}", config);

        let engine = Self::new(config);
        if let Some(file) = engine.config.blacklist.file.clone() {
            engine.load_blacklist_file(&file).await?;
        }
        Ok(engine)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn blacklist(&self) -> Blacklist {
        self.blacklist.get().await
    }

    /// Replace the blacklist used by subsequent analyses
    pub async fn set_blacklist<I, S>(&self, method_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.replace(method_names.into_iter().collect()).await;
    }

    pub async fn load_blacklist_file(&self, path: &Path) -> Result<usize> {
        let blacklist = Blacklist::load(path)
            .with_context(|| format!("failed to read blacklist {}", path.display()))?;
        let count = blacklist.len();
        self.blacklist.replace(blacklist).await;
        info!("Loaded {} blacklisted methods from {}", count, path.display());
        Ok(count)
    }

    /// Analyze a source tree with the current blacklist and return the graph
    pub async fn analyze_graph(&self, path: impl AsRef<Path>) -> crate::error::Result<CallGraph> {
        let root = path.as_ref().to_path_buf();
        let config = self.config.analysis.clone();
        let blacklist = self.blacklist.get().await;

        let result = tokio::task::spawn_blocking(move || {
            Analyzer::new(config, blacklist)?.analyze_directory(&root)
        })
        .await??;

        Ok(result.graph)
    }

    /// Analyze a source tree and return the network JSON document
    pub async fn analyze(&self, path: impl AsRef<Path>) -> crate::error::Result<String> {
        let graph = self.analyze_graph(path).await?;
        JsonEmitter::new(self.config.output.pretty).emit(&graph)
    }

    pub async fn write_output(&self, json: &str, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json).await.map_err(AnalyzerError::from)
    }

    /// `analyze` command: run and write the document to a file or stdout
    pub async fn run_analyze(
        &self,
        source: PathBuf,
        blacklist: Option<PathBuf>,
        output: Option<PathBuf>,
        to_stdout: bool,
    ) -> Result<()> {
        if let Some(file) = blacklist {
            self.load_blacklist_file(&file).await?;
        }

        let json = self
            .analyze(&source)
            .await
            .with_context(|| format!("failed to analyze directory {}", source.display()))?;

        if to_stdout {
            println!("{}", json);
            return Ok(());
        }

        let output = output.unwrap_or_else(|| self.config.output.path.clone());
        self.write_output(&json, &output)
            .await
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("Network JSON has been written to: {}", output.display());
        Ok(())
    }

    /// `init` command: write the active configuration as a starting config file
    pub async fn init(&self, path: Option<PathBuf>, force: bool) -> Result<()> {
        let dir = path.unwrap_or_else(|| PathBuf::from("."));
        let config_path = dir.join(CONFIG_CANDIDATES[1]);

        if config_path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        std::fs::create_dir_all(&dir)?;
        self.config.save(&config_path)?;
        info!("Wrote {}", config_path.display());
        Ok(())
    }
}
