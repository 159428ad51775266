use crate::core::aggregate::aggregate;
use crate::core::loader::SnapshotLoader;
use crate::core::rank::{rank_teams, sort_team_countries};
use crate::core::render;
use crate::domain::model::{PoolSnapshot, SortMap, StandingsResult};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

/// Render pipeline: load the pool snapshot, aggregate and rank it, then
/// write the standings projections (HTML, CSV, plain text) to the output
/// directory.
pub struct StandingsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    loader: SnapshotLoader,
}

impl<S: Storage, C: ConfigProvider> StandingsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let loader = SnapshotLoader::new(config.pool_source());
        Self {
            storage,
            config,
            loader,
        }
    }

    /// 為每個成員建立排序指令；CLI 模式下所有成員共用同一個指令
    fn seed_directives(&self, snapshot: &PoolSnapshot) -> SortMap {
        let directive = self.config.sort_directive();
        let mut directives = SortMap::new();
        for entry in &snapshot.teams {
            directives.entry(entry.member.clone()).or_insert(directive);
        }
        directives
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StandingsPipeline<S, C> {
    type Raw = PoolSnapshot;
    type Output = StandingsResult;

    async fn extract(&self) -> Result<PoolSnapshot> {
        let snapshot = self.loader.load().await?;
        tracing::info!("📥 Loaded {} pool entries", snapshot.teams.len());
        Ok(snapshot)
    }

    async fn transform(&self, snapshot: PoolSnapshot) -> Result<StandingsResult> {
        let directives = self.seed_directives(&snapshot);

        let mut teams = aggregate(&snapshot.teams);
        rank_teams(&mut teams);
        sort_team_countries(&mut teams, &directives);

        let updated_at = snapshot.updated_at.clone();
        let html_output = render::render_html(&teams, updated_at.as_deref());
        let text_output = render::render_text(&teams, updated_at.as_deref());
        let csv_output = render::render_csv(&teams)?;

        tracing::info!("🏅 Ranked {} teams", teams.len());

        Ok(StandingsResult {
            teams,
            updated_at,
            html_output,
            text_output,
            csv_output,
        })
    }

    async fn load(&self, result: StandingsResult) -> Result<String> {
        self.storage
            .write_file("standings.html", result.html_output.as_bytes())
            .await?;
        self.storage
            .write_file("standings.csv", result.csv_output.as_bytes())
            .await?;
        self.storage
            .write_file("standings.txt", result.text_output.as_bytes())
            .await?;

        let output_path = format!("{}/standings.html", self.config.output_path());
        tracing::debug!("Standings written to {}", output_path);
        Ok(output_path)
    }
}
