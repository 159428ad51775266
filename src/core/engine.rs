use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a pipeline through extract, transform and load with phase
/// logging and optional system monitoring.
pub struct PoolEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> PoolEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting data...");
        let raw = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming data...");
        let output = self.pipeline.transform(raw).await?;
        self.monitor.log_stats("Transform");

        tracing::info!("Loading output...");
        let path = self.pipeline.load(output).await?;
        self.monitor.log_stats("Load");

        if self.monitor.is_enabled() {
            self.monitor.log_final_stats();
        }

        Ok(path)
    }
}
