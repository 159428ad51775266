use clap::Parser;
use medal_pool::config::toml_config::UpdateFileConfig;
use medal_pool::utils::error::ErrorSeverity;
use medal_pool::utils::{logger, validation::Validate};
use medal_pool::{LocalStorage, PoolEngine, UpdateConfig, UpdatePipeline};

#[tokio::main]
async fn main() {
    let mut config = UpdateConfig::parse();

    logger::init_batch_logger(config.log_json, config.verbose);

    tracing::info!("Starting medal update");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 可選的 TOML 配置檔案會覆蓋命令列參數
    if let Some(path) = config.config.clone() {
        match UpdateFileConfig::from_file(&path) {
            Ok(file) => config.apply_file(file),
            Err(e) => {
                tracing::error!("❌ Could not load config file: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(3);
            }
        }
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = UpdatePipeline::new(storage, config.options());
    let engine = PoolEngine::new(pipeline);

    match engine.run().await {
        Ok(pool_path) => {
            tracing::info!("✅ Medal update completed successfully!");
            println!("✅ Medal update completed successfully!");
            println!("📁 Pool written to: {}", pool_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Medal update failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // The last good snapshot is untouched; exit non-zero so a
            // scheduler can flag the run.
            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
