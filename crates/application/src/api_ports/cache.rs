use async_trait::async_trait;
use ocorrencias_core::AppResult;
use ocorrencias_domain::ReferenceData;

/// Optional cache port for reference collections.
#[async_trait]
pub trait ReferenceDataCache: Send + Sync {
    /// Returns cached reference data when it has not expired.
    async fn get_reference_data(&self) -> AppResult<Option<ReferenceData>>;

    /// Stores reference data with ttl.
    async fn set_reference_data(&self, data: ReferenceData, ttl_seconds: u32) -> AppResult<()>;
}
