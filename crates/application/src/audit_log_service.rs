use std::sync::Arc;

use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::{EnrichedAuditLogEntry, ReferenceData, enrich_audit_entries};
use tracing::{debug, warn};

use crate::api_ports::{AuditLogGateway, AuditLogQuery, ReferenceDataCache, ReferenceDataGateway};

/// Audit viewer use-case: fetches one page and resolves its ids for display.
#[derive(Clone)]
pub struct AuditLogService {
    audit_gateway: Arc<dyn AuditLogGateway>,
    reference_gateway: Arc<dyn ReferenceDataGateway>,
    reference_cache: Option<Arc<dyn ReferenceDataCache>>,
    reference_cache_ttl_seconds: u32,
}

impl AuditLogService {
    /// Creates an audit log service.
    #[must_use]
    pub fn new(
        audit_gateway: Arc<dyn AuditLogGateway>,
        reference_gateway: Arc<dyn ReferenceDataGateway>,
    ) -> Self {
        Self {
            audit_gateway,
            reference_gateway,
            reference_cache: None,
            reference_cache_ttl_seconds: 0,
        }
    }

    /// Adds optional reference data caching behavior.
    #[must_use]
    pub fn with_reference_cache(
        mut self,
        reference_cache: Arc<dyn ReferenceDataCache>,
        ttl_seconds: u32,
    ) -> Self {
        self.reference_cache = Some(reference_cache);
        self.reference_cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Loads one audit page with actor and target details resolved.
    ///
    /// The page and the reference collections are fetched concurrently. A
    /// failed reference collection is replaced by an empty one so only the
    /// details depending on it go missing; a failed page fetch is an error.
    pub async fn load_enriched_page(
        &self,
        query: AuditLogQuery,
    ) -> AppResult<Vec<EnrichedAuditLogEntry>> {
        query.validate()?;

        let (entries, reference_data) = tokio::join!(
            self.audit_gateway.list_audit_logs(query.clone()),
            self.load_reference_data()
        );
        let entries = entries?;

        debug!(
            limit = query.limit,
            offset = query.offset,
            entry_count = entries.len(),
            user_count = reference_data.users.len(),
            occurrence_count = reference_data.occurrences.len(),
            "enriching audit log page"
        );

        Ok(enrich_audit_entries(&entries, &reference_data))
    }

    /// Loads up to `pages` consecutive pages starting at `query.offset`.
    ///
    /// Each page advances the offset by `query.limit`. Loading stops early after
    /// a short page. With a reference cache configured, later pages reuse the
    /// reference data fetched for the first one.
    pub async fn load_enriched_pages(
        &self,
        query: AuditLogQuery,
        pages: usize,
    ) -> AppResult<Vec<EnrichedAuditLogEntry>> {
        if pages == 0 {
            return Err(AppError::Validation(
                "page count must be at least 1".to_owned(),
            ));
        }

        let mut enriched = Vec::new();
        let mut page_query = query;
        for _ in 0..pages {
            let page = self.load_enriched_page(page_query.clone()).await?;
            let is_last_page = page.len() < page_query.limit;
            enriched.extend(page);
            if is_last_page {
                break;
            }
            page_query.offset += page_query.limit;
        }

        Ok(enriched)
    }

    async fn load_reference_data(&self) -> ReferenceData {
        if let Some(cache) = &self.reference_cache {
            match cache.get_reference_data().await {
                Ok(Some(reference_data)) => return reference_data,
                Ok(None) => {}
                Err(error) => {
                    warn!(error = %error, "failed to read reference data cache");
                }
            }
        }

        let gateway = &self.reference_gateway;
        let (users, occurrences, statuses, sectors, workflows) = tokio::join!(
            gateway.list_users(),
            gateway.list_occurrences(),
            gateway.list_statuses(),
            gateway.list_sectors(),
            gateway.list_workflows()
        );

        let mut is_complete = true;
        let reference_data = ReferenceData {
            users: or_empty("users", users, &mut is_complete),
            occurrences: or_empty("occurrences", occurrences, &mut is_complete),
            statuses: or_empty("statuses", statuses, &mut is_complete),
            sectors: or_empty("sectors", sectors, &mut is_complete),
            workflows: or_empty("workflows", workflows, &mut is_complete),
        };

        if is_complete && let Some(cache) = &self.reference_cache {
            if let Err(error) = cache
                .set_reference_data(reference_data.clone(), self.reference_cache_ttl_seconds)
                .await
            {
                warn!(error = %error, "failed to store reference data cache");
            }
        }

        reference_data
    }
}

fn or_empty<T>(
    collection: &'static str,
    result: AppResult<Vec<T>>,
    is_complete: &mut bool,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(error) => {
            *is_complete = false;
            warn!(
                collection,
                error = %error,
                "reference collection unavailable, continuing without it"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests;
