pub mod aggregate;
pub mod engine;
pub mod loader;
pub mod normalize;
pub mod rank;
pub mod reconcile;
pub mod render;
pub mod scoring;
pub mod standings_pipeline;
pub mod update_pipeline;

pub use crate::domain::model::{AggregatedTeam, Entry, PoolSnapshot, ScoredEntry, SortDirective};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
