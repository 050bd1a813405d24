use crate::domain::model::GeneratedBatch;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Durable home of the most recent batch. There is exactly one slot.
#[async_trait]
pub trait BatchStore: Send + Sync {
    async fn load(&self) -> Result<Option<GeneratedBatch>>;
    async fn save(&self, batch: &GeneratedBatch) -> Result<()>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn download_filename(&self) -> &str;
    fn compose_base_url(&self) -> &str;
    fn dismiss_after_secs(&self) -> u64;
}
