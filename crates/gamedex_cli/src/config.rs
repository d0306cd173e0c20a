//! Configuration file support for gamedex.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `GAMEDEX_`, sections separated by
//!    `__`, e.g., `GAMEDEX_LINKS__CONCURRENCY=4`)
//! 3. Local config file (./gamedex.toml)
//! 4. XDG config file (~/.config/gamedex/config.toml)
//! 5. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [catalog]
//! root = "/home/me/open-source-games"
//! games_dir = "games"
//! readme = "README.md"
//! toc_file = "_toc.md"
//! template = "games/template.md"
//! statistics = "games/statistics.md"
//! json_export = "docs/data.json"
//! readme_heading = "# Open Source Games"
//! readme_tail = "A collection"
//!
//! [links]
//! concurrency = 8
//! timeout_secs = 15
//! requests_per_second = 10
//! max_retries = 2
//! retry_delay_ms = 500
//! max_retry_delay_ms = 10000
//! user_agent = "Mozilla/5.0 (Windows NT 10.0; WOW64)"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use gamedex::CatalogLayout;
use gamedex::links::{DEFAULT_USER_AGENT, LinkCheckOptions};
use gamedex::rate_limit::DEFAULT_RPS;
use gamedex::retry::{
    DEFAULT_MAX_RETRIES, DEFAULT_MAX_RETRY_DELAY_MS, DEFAULT_RETRY_DELAY_MS, RetryPolicy,
};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog location and file names.
    pub catalog: CatalogConfig,
    /// External link check settings.
    pub links: LinksConfig,
}

/// Catalog location and file names, relative to `root`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub root: PathBuf,
    pub games_dir: PathBuf,
    pub readme: PathBuf,
    pub toc_file: String,
    pub template: PathBuf,
    pub statistics: PathBuf,
    pub json_export: PathBuf,
    pub readme_heading: String,
    pub readme_tail: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let layout = CatalogLayout::new(".");
        Self {
            root: layout.root,
            games_dir: layout.games_dir,
            readme: layout.readme,
            toc_file: layout.toc_file,
            template: layout.template,
            statistics: layout.statistics,
            json_export: layout.json_export,
            readme_heading: layout.readme_heading,
            readme_tail: layout.readme_tail,
        }
    }
}

/// External link check settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Maximum concurrent requests.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Request rate limit.
    pub requests_per_second: u32,
    /// Retries for requests that got no response.
    pub max_retries: usize,
    /// Delay before the first retry, doubled for each further one.
    pub retry_delay_ms: u64,
    /// Upper bound for a single retry delay.
    pub max_retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            timeout_secs: 15,
            requests_per_second: DEFAULT_RPS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_retry_delay_ms: DEFAULT_MAX_RETRY_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/gamedex/config.toml)
    /// 3. Local config file (./gamedex.toml)
    /// 4. Environment variables with GAMEDEX_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("gamedex.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./gamedex.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // GAMEDEX_CATALOG__ROOT -> catalog.root
        builder = builder.add_source(
            Environment::with_prefix("GAMEDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Catalog layout, with `root_override` (from `--root`) taking precedence.
    pub fn layout(&self, root_override: Option<PathBuf>) -> CatalogLayout {
        let catalog = &self.catalog;
        CatalogLayout {
            root: root_override.unwrap_or_else(|| catalog.root.clone()),
            games_dir: catalog.games_dir.clone(),
            readme: catalog.readme.clone(),
            toc_file: catalog.toc_file.clone(),
            template: catalog.template.clone(),
            statistics: catalog.statistics.clone(),
            json_export: catalog.json_export.clone(),
            readme_heading: catalog.readme_heading.clone(),
            readme_tail: catalog.readme_tail.clone(),
        }
    }

    /// Link check options, with CLI overrides applied.
    pub fn link_options(&self, concurrency: Option<usize>) -> LinkCheckOptions {
        let links = &self.links;
        LinkCheckOptions {
            concurrency: concurrency.unwrap_or(links.concurrency),
            requests_per_second: links.requests_per_second,
            retry: RetryPolicy::from_millis(
                links.max_retries,
                links.retry_delay_ms,
                links.max_retry_delay_ms,
            ),
            user_agent: links.user_agent.clone(),
        }
    }

    pub fn link_timeout(&self, timeout_secs: Option<u64>) -> Duration {
        Duration::from_secs(timeout_secs.unwrap_or(self.links.timeout_secs))
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gamedex").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
