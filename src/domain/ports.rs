use crate::domain::model::SortDirective;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn pool_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn sort_directive(&self) -> SortDirective;
    fn refresh_interval(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Raw: Send + 'static;
    type Output: Send + 'static;

    async fn extract(&self) -> Result<Self::Raw>;
    async fn transform(&self, raw: Self::Raw) -> Result<Self::Output>;
    async fn load(&self, output: Self::Output) -> Result<String>;
}
