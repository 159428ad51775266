use crate::domain::model::PoolSnapshot;
use crate::utils::error::{PoolError, Result};
use serde_json::Value;
use std::path::PathBuf;

/// Where the pool snapshot lives for this run.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    File(PathBuf),
    Url(String),
}

impl SnapshotSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SnapshotSource::Url(raw.to_string())
        } else {
            SnapshotSource::File(PathBuf::from(raw))
        }
    }
}

/// Reads and validates the pool snapshot from a local file or a remote URL.
/// Every failure mode (unreachable source, non-success status, malformed
/// JSON, wrong shape, invalid entries) surfaces as an error here and never
/// panics past this boundary; callers decide whether to keep showing the
/// previous snapshot.
pub struct SnapshotLoader {
    source: SnapshotSource,
    client: reqwest::Client,
}

impl SnapshotLoader {
    pub fn new(source: &str) -> Self {
        Self {
            source: SnapshotSource::parse(source),
            client: reqwest::Client::new(),
        }
    }

    pub async fn load(&self) -> Result<PoolSnapshot> {
        let value = match &self.source {
            SnapshotSource::File(path) => {
                let raw = tokio::fs::read(path).await?;
                serde_json::from_slice::<Value>(&raw).map_err(|e| PoolError::LoadError {
                    message: format!("malformed pool JSON: {}", e),
                })?
            }
            SnapshotSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(PoolError::LoadError {
                        message: format!("pool request failed: {}", response.status()),
                    });
                }
                response
                    .json::<Value>()
                    .await
                    .map_err(|e| PoolError::LoadError {
                        message: format!("malformed pool JSON: {}", e),
                    })?
            }
        };

        let snapshot = PoolSnapshot::from_json(value)?;
        snapshot.validate()?;
        tracing::debug!("Loaded {} pool entries", snapshot.teams.len());
        Ok(snapshot)
    }
}
