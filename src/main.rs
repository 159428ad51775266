use clap::Parser;
use medal_pool::domain::model::{PoolSnapshot, StandingsResult};
use medal_pool::domain::ports::{ConfigProvider, Pipeline};
use medal_pool::utils::error::ErrorSeverity;
use medal_pool::utils::{logger, validation::Validate};
use medal_pool::{CliConfig, LocalStorage, PoolEngine, StandingsPipeline};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting medal-pool standings renderer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let watch = config.watch;
    let interval = config.refresh_interval();
    let monitor_enabled = config.monitor;

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StandingsPipeline::new(storage, config);

    if watch {
        watch_loop(pipeline, interval).await;
        return Ok(());
    }

    let engine = PoolEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Standings rendered successfully!");
            println!("✅ Standings rendered successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Standings render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Fixed-interval refresh loop. Cycles are serialized: a new refresh never
/// starts while the previous one is still running, and a failed reload
/// keeps rendering the last snapshot that loaded cleanly instead of
/// blanking the standings.
async fn watch_loop<P>(pipeline: P, interval: Duration)
where
    P: Pipeline<Raw = PoolSnapshot, Output = StandingsResult>,
{
    tracing::info!("🔄 Watch mode: refreshing every {:?}", interval);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_good: Option<PoolSnapshot> = None;

    loop {
        ticker.tick().await;

        let snapshot = match pipeline.extract().await {
            Ok(snapshot) => {
                last_good = Some(snapshot.clone());
                snapshot
            }
            Err(e) => {
                tracing::warn!("⚠️ Pool refresh failed: {}", e.user_friendly_message());
                match last_good.clone() {
                    Some(previous) => {
                        tracing::warn!("Keeping standings from the previous snapshot");
                        previous
                    }
                    None => {
                        tracing::warn!("No snapshot loaded yet; nothing to render");
                        continue;
                    }
                }
            }
        };

        match render(&pipeline, snapshot).await {
            Ok(output_path) => tracing::info!("✅ Standings refreshed: {}", output_path),
            Err(e) => tracing::error!("❌ Standings render failed: {}", e),
        }
    }
}

async fn render<P>(pipeline: &P, snapshot: PoolSnapshot) -> medal_pool::Result<String>
where
    P: Pipeline<Raw = PoolSnapshot, Output = StandingsResult>,
{
    let result = pipeline.transform(snapshot).await?;
    pipeline.load(result).await
}
