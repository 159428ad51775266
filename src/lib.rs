pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, UpdateConfig};

pub use crate::config::{cli::LocalStorage, UpdateOptions};
pub use crate::core::{
    engine::PoolEngine, standings_pipeline::StandingsPipeline, update_pipeline::UpdatePipeline,
};
pub use crate::domain::model::{
    AggregatedTeam, Entry, PoolSnapshot, ScoredEntry, SortDir, SortDirective, SortKey,
};
pub use crate::utils::error::{PoolError, Result};
