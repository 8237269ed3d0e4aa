use std::time::{Duration, Instant};

use async_trait::async_trait;
use ocorrencias_application::ReferenceDataCache;
use ocorrencias_core::AppResult;
use ocorrencias_domain::ReferenceData;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct ReferenceDataCacheEntry {
    data: ReferenceData,
    expires_at: Instant,
}

/// In-memory cache adapter for reference collections.
#[derive(Default)]
pub struct InMemoryReferenceDataCache {
    entry: RwLock<Option<ReferenceDataCacheEntry>>,
}

impl InMemoryReferenceDataCache {
    /// Creates an empty in-memory reference data cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReferenceDataCache for InMemoryReferenceDataCache {
    async fn get_reference_data(&self) -> AppResult<Option<ReferenceData>> {
        {
            let entry = self.entry.read().await;
            match entry.as_ref() {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.data.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entry = self.entry.write().await;
        if entry
            .as_ref()
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            *entry = None;
        }

        Ok(None)
    }

    async fn set_reference_data(&self, data: ReferenceData, ttl_seconds: u32) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(u64::from(ttl_seconds)))
            .unwrap_or(now);

        *self.entry.write().await = Some(ReferenceDataCacheEntry { data, expires_at });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ocorrencias_application::ReferenceDataCache;
    use ocorrencias_domain::{ReferenceData, SectorRef};

    use super::InMemoryReferenceDataCache;

    fn reference_data() -> ReferenceData {
        ReferenceData {
            sectors: vec![SectorRef {
                id: 1,
                name: "TI".to_owned(),
            }],
            ..ReferenceData::default()
        }
    }

    #[tokio::test]
    async fn stored_data_is_returned_before_expiry() {
        let cache = InMemoryReferenceDataCache::new();
        cache
            .set_reference_data(reference_data(), 60)
            .await
            .unwrap_or_else(|error| panic!("store should succeed: {error}"));

        let cached = cache
            .get_reference_data()
            .await
            .unwrap_or_else(|error| panic!("read should succeed: {error}"));

        assert_eq!(cached, Some(reference_data()));
    }

    #[tokio::test]
    async fn zero_ttl_disables_storage() {
        let cache = InMemoryReferenceDataCache::new();
        cache
            .set_reference_data(reference_data(), 0)
            .await
            .unwrap_or_else(|error| panic!("store should succeed: {error}"));

        let cached = cache
            .get_reference_data()
            .await
            .unwrap_or_else(|error| panic!("read should succeed: {error}"));

        assert!(cached.is_none());
    }
}
