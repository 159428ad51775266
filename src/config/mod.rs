pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{SortDir, SortDirective, SortKey};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;

/// Published widget settings; carries the current competition code.
pub const DEFAULT_SETTINGS_URL: &str =
    "https://images.nbcolympics.com/static/json/medals-widget-settings.json";

/// Per-country medal table for one competition.
pub const DEFAULT_MEDALS_ENDPOINT: &str = "https://sdf.nbcolympics.com/v1/widget/medals/country";

/// Static key the medals widget ships publicly.
pub const DEFAULT_API_KEY: &str = "daaacddd-1513-46a3-8b79-ac3584258f5b";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "medal-pool")]
#[command(about = "Render the medal pool standings from a pool snapshot")]
pub struct CliConfig {
    /// Pool snapshot: a local path or an http(s) URL
    #[arg(long, default_value = "pool.json")]
    pub pool_source: String,

    /// Directory the rendered standings are written to
    #[arg(long, default_value = "./public")]
    pub output_path: String,

    /// Country sort column applied to every member's table
    #[arg(long, value_enum, default_value = "points")]
    pub sort: SortKey,

    /// Sort direction; defaults to the column's natural direction
    #[arg(long, value_enum)]
    pub dir: Option<SortDir>,

    /// Keep running and re-render on a fixed interval
    #[arg(long)]
    pub watch: bool,

    /// Seconds between refreshes in watch mode
    #[arg(long, default_value = "300")]
    pub interval_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn pool_source(&self) -> &str {
        &self.pool_source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn sort_directive(&self) -> SortDirective {
        let dir = self.dir.unwrap_or_else(|| self.sort.default_dir());
        SortDirective::new(self.sort, dir)
    }

    fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.pool_source.starts_with("http://") || self.pool_source.starts_with("https://") {
            validation::validate_url("pool_source", &self.pool_source)?;
        } else {
            validation::validate_path("pool_source", &self.pool_source)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        if self.watch {
            validation::validate_positive_number("interval_seconds", self.interval_seconds, 5)?;
        }
        Ok(())
    }
}

/// Settings for one run of the medal updater. Plain struct so the pipeline
/// stays usable without the cli feature.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub pool_path: String,
    pub mirror_path: String,
    pub settings_url: String,
    pub medals_endpoint: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub dry_run: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            pool_path: "pool.json".to_string(),
            mirror_path: "pool.js".to_string(),
            settings_url: DEFAULT_SETTINGS_URL.to_string(),
            medals_endpoint: DEFAULT_MEDALS_ENDPOINT.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_seconds: 30,
            dry_run: false,
        }
    }
}

impl Validate for UpdateOptions {
    fn validate(&self) -> Result<()> {
        validation::validate_path("pool_path", &self.pool_path)?;
        validation::validate_path("mirror_path", &self.mirror_path)?;
        validation::validate_url("settings_url", &self.settings_url)?;
        validation::validate_url("medals_endpoint", &self.medals_endpoint)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "update-medals")]
#[command(about = "Fetch official medal totals and rewrite the local pool snapshot")]
pub struct UpdateConfig {
    /// Pool snapshot rewritten by the update
    #[arg(long, default_value = "pool.json")]
    pub pool_path: String,

    /// Script mirror written next to the pool (window.POOL_DATA)
    #[arg(long, default_value = "pool.js")]
    pub mirror_path: String,

    #[arg(long, default_value = DEFAULT_SETTINGS_URL)]
    pub settings_url: String,

    #[arg(long, default_value = DEFAULT_MEDALS_ENDPOINT)]
    pub medals_endpoint: String,

    #[arg(long, default_value = DEFAULT_API_KEY)]
    pub api_key: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Optional TOML config; values set in the file override the flags
    #[arg(long)]
    pub config: Option<String>,

    /// Fetch and merge but skip the writes
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit JSON log lines (for scheduled runs)")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl UpdateConfig {
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions {
            pool_path: self.pool_path.clone(),
            mirror_path: self.mirror_path.clone(),
            settings_url: self.settings_url.clone(),
            medals_endpoint: self.medals_endpoint.clone(),
            api_key: self.api_key.clone(),
            timeout_seconds: self.timeout_seconds,
            dry_run: self.dry_run,
        }
    }

    /// Overlay values from a TOML config file.
    pub fn apply_file(&mut self, file: toml_config::UpdateFileConfig) {
        if let Some(pool) = file.pool {
            if let Some(path) = pool.path {
                self.pool_path = path;
            }
            if let Some(mirror) = pool.mirror {
                self.mirror_path = mirror;
            }
        }
        if let Some(source) = file.source {
            if let Some(url) = source.settings_url {
                self.settings_url = url;
            }
            if let Some(endpoint) = source.endpoint {
                self.medals_endpoint = endpoint;
            }
            if let Some(key) = source.api_key {
                self.api_key = key;
            }
            if let Some(timeout) = source.timeout_seconds {
                self.timeout_seconds = timeout;
            }
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for UpdateConfig {
    fn validate(&self) -> Result<()> {
        self.options().validate()
    }
}
