use crate::config::UpdateOptions;
use crate::core::reconcile::merge_medals;
use crate::domain::model::{MedalRow, MergedPool, PoolSnapshot};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{PoolError, Result};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Header carrying the static widget API key.
pub const AUTH_HEADER: &str = "x-olyapiauth";

/// Accepted spellings of the competition identifier in the settings blob,
/// in priority order.
pub const COMPETITION_CODE_FIELDS: &[&str] = &["competition_code", "competitionCode"];

/// One-shot batch pipeline: fetch the official medal table, reconcile it
/// against the local pool and rewrite the snapshot plus its script mirror.
/// Everything up to the load step is read-only, so a failed run leaves the
/// last good snapshot untouched.
pub struct UpdatePipeline<S: Storage> {
    storage: S,
    options: UpdateOptions,
    client: Client,
}

impl<S: Storage> UpdatePipeline<S> {
    pub fn new(storage: S, options: UpdateOptions) -> Self {
        Self {
            storage,
            options,
            client: Client::new(),
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.timeout_seconds)
    }

    /// 從設定資源取得本屆賽事代碼
    async fn fetch_competition_code(&self) -> Result<String> {
        tracing::debug!("📡 Fetching settings from {}", self.options.settings_url);
        let response = self
            .client
            .get(&self.options.settings_url)
            .timeout(self.request_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PoolError::ReconcileError {
                message: format!("settings request failed: {}", response.status()),
            });
        }

        let settings: Value = response.json().await.map_err(|e| PoolError::ReconcileError {
            message: format!("settings response was not valid JSON: {}", e),
        })?;

        COMPETITION_CODE_FIELDS
            .iter()
            .filter_map(|field| settings.get(*field))
            .filter_map(Value::as_str)
            .find(|code| !code.is_empty())
            .map(str::to_string)
            .ok_or_else(|| PoolError::ReconcileError {
                message: "unable to determine competition code from settings".to_string(),
            })
    }

    async fn fetch_medal_rows(&self, competition_code: &str) -> Result<Vec<MedalRow>> {
        tracing::debug!(
            "📡 Fetching medal table for competition {}",
            competition_code
        );
        let response = self
            .client
            .get(&self.options.medals_endpoint)
            .query(&[("competitionCode", competition_code)])
            .header(AUTH_HEADER, &self.options.api_key)
            .timeout(self.request_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PoolError::ReconcileError {
                message: format!("medals request failed: {}", response.status()),
            });
        }

        let payload: Value = response.json().await.map_err(|e| PoolError::ReconcileError {
            message: format!("medals response was not valid JSON: {}", e),
        })?;

        let Value::Array(items) = payload else {
            return Err(PoolError::ReconcileError {
                message: "medals API response was not an array".to_string(),
            });
        };
        if items.is_empty() {
            return Err(PoolError::ReconcileError {
                message: "no medal rows were found in the medals feed".to_string(),
            });
        }

        serde_json::from_value(Value::Array(items)).map_err(|e| PoolError::ReconcileError {
            message: format!("invalid medal row: {}", e),
        })
    }

    async fn read_pool(&self) -> Result<PoolSnapshot> {
        let raw = self.storage.read_file(&self.options.pool_path).await?;
        let value = serde_json::from_slice::<Value>(&raw).map_err(|e| PoolError::LoadError {
            message: format!("malformed pool JSON: {}", e),
        })?;
        let snapshot = PoolSnapshot::from_json(value)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for UpdatePipeline<S> {
    type Raw = (PoolSnapshot, Vec<MedalRow>);
    type Output = MergedPool;

    async fn extract(&self) -> Result<Self::Raw> {
        let snapshot = self.read_pool().await?;
        tracing::info!("📥 Loaded {} pool entries", snapshot.teams.len());

        let competition_code = self.fetch_competition_code().await?;
        let rows = self.fetch_medal_rows(&competition_code).await?;
        tracing::info!("📡 Fetched {} medal rows", rows.len());

        Ok((snapshot, rows))
    }

    async fn transform(&self, (snapshot, rows): Self::Raw) -> Result<MergedPool> {
        let outcome = merge_medals(&snapshot.teams, &rows);
        let snapshot = PoolSnapshot {
            updated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            teams: outcome.teams,
            shape: snapshot.shape,
        };
        Ok(MergedPool {
            snapshot,
            missing_countries: outcome.missing,
        })
    }

    async fn load(&self, merged: MergedPool) -> Result<String> {
        let body = serde_json::to_string_pretty(&merged.snapshot.to_json()?)?;
        let entry_count = merged.snapshot.teams.len();

        if self.options.dry_run {
            tracing::info!(
                "🔍 Dry run: would update {} entries in {}",
                entry_count,
                self.options.pool_path
            );
        } else {
            self.storage
                .write_file(&self.options.pool_path, format!("{}\n", body).as_bytes())
                .await?;
            self.storage
                .write_file(
                    &self.options.mirror_path,
                    format!("window.POOL_DATA = {};\n", body).as_bytes(),
                )
                .await?;
        }

        if !merged.missing_countries.is_empty() {
            tracing::warn!(
                "⚠️ Countries not found in medal table: {}",
                merged.missing_countries.join(", ")
            );
        }

        tracing::info!("✅ Updated medal totals for {} entries", entry_count);
        Ok(self.options.pool_path.clone())
    }
}
