use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;

use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::{
    AuditAction, AuditLogEntry, AuditTargetType, OccurrenceRef, ReferenceData, SectorRef,
    StatusRef, TargetDetails, UserProfile, UserRef, WorkflowRef,
};

use crate::api_ports::{AuditLogGateway, AuditLogQuery, ReferenceDataCache, ReferenceDataGateway};

use super::AuditLogService;

struct FakeAuditLogGateway {
    entries: Vec<AuditLogEntry>,
    fail: bool,
    queries: Mutex<Vec<AuditLogQuery>>,
}

impl FakeAuditLogGateway {
    fn with_entries(entries: Vec<AuditLogEntry>) -> Self {
        Self {
            entries,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuditLogGateway for FakeAuditLogGateway {
    async fn list_audit_logs(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        self.queries.lock().await.push(query);
        if self.fail {
            return Err(AppError::Internal("audit endpoint down".to_owned()));
        }
        Ok(self.entries.clone())
    }
}

#[derive(Default)]
struct FakeReferenceDataGateway {
    data: ReferenceData,
    failing_workflows: bool,
    failing_users: bool,
    fetch_count: Mutex<usize>,
}

#[async_trait]
impl ReferenceDataGateway for FakeReferenceDataGateway {
    async fn list_users(&self) -> AppResult<Vec<UserRef>> {
        *self.fetch_count.lock().await += 1;
        if self.failing_users {
            return Err(AppError::Unauthorized("token expired".to_owned()));
        }
        Ok(self.data.users.clone())
    }

    async fn list_occurrences(&self) -> AppResult<Vec<OccurrenceRef>> {
        Ok(self.data.occurrences.clone())
    }

    async fn list_statuses(&self) -> AppResult<Vec<StatusRef>> {
        Ok(self.data.statuses.clone())
    }

    async fn list_sectors(&self) -> AppResult<Vec<SectorRef>> {
        Ok(self.data.sectors.clone())
    }

    async fn list_workflows(&self) -> AppResult<Vec<WorkflowRef>> {
        if self.failing_workflows {
            return Err(AppError::Internal("workflows endpoint down".to_owned()));
        }
        Ok(self.data.workflows.clone())
    }
}

#[derive(Default)]
struct FakeReferenceDataCache {
    stored: Mutex<Option<(ReferenceData, u32)>>,
}

#[async_trait]
impl ReferenceDataCache for FakeReferenceDataCache {
    async fn get_reference_data(&self) -> AppResult<Option<ReferenceData>> {
        Ok(self.stored.lock().await.as_ref().map(|(data, _)| data.clone()))
    }

    async fn set_reference_data(&self, data: ReferenceData, ttl_seconds: u32) -> AppResult<()> {
        *self.stored.lock().await = Some((data, ttl_seconds));
        Ok(())
    }
}

fn entry(
    id: i64,
    actor_id: Option<i64>,
    target_type: AuditTargetType,
    target_id: i64,
) -> AuditLogEntry {
    AuditLogEntry {
        id,
        actor_id,
        action: AuditAction::new("update_registro").unwrap_or_else(|_| panic!("valid action")),
        target_type,
        target_id,
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("valid timestamp")),
    }
}

fn reference_data() -> ReferenceData {
    ReferenceData {
        users: vec![UserRef {
            id: 1,
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            profile: UserProfile::Admin,
            sector: Some(SectorRef {
                id: 9,
                name: "TI".to_owned(),
            }),
        }],
        occurrences: Vec::new(),
        statuses: Vec::new(),
        sectors: vec![SectorRef {
            id: 9,
            name: "TI".to_owned(),
        }],
        workflows: vec![WorkflowRef {
            id: 3,
            name: "Suporte".to_owned(),
        }],
    }
}

fn page() -> Vec<AuditLogEntry> {
    vec![
        entry(10, Some(1), AuditTargetType::Workflow, 3),
        entry(11, None, AuditTargetType::Sector, 9),
    ]
}

#[tokio::test]
async fn page_is_enriched_in_order() {
    let audit_gateway = Arc::new(FakeAuditLogGateway::with_entries(page()));
    let reference_gateway = Arc::new(FakeReferenceDataGateway {
        data: reference_data(),
        ..FakeReferenceDataGateway::default()
    });
    let service = AuditLogService::new(audit_gateway.clone(), reference_gateway);

    let enriched = service
        .load_enriched_page(AuditLogQuery::page(20, 40))
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));

    let ids: Vec<i64> = enriched.iter().map(|item| item.entry.id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert_eq!(
        enriched[0].actor.as_ref().map(|actor| actor.name.as_str()),
        Some("Ana")
    );
    assert_eq!(
        enriched[0].target_details,
        Some(TargetDetails::Workflow {
            name: "Suporte".to_owned()
        })
    );
    assert!(enriched[1].actor.is_none());

    let queries = audit_gateway.queries.lock().await;
    assert_eq!(queries.as_slice(), &[AuditLogQuery::page(20, 40)]);
}

#[tokio::test]
async fn failed_reference_collection_only_drops_dependent_details() {
    let service = AuditLogService::new(
        Arc::new(FakeAuditLogGateway::with_entries(page())),
        Arc::new(FakeReferenceDataGateway {
            data: reference_data(),
            failing_workflows: true,
            ..FakeReferenceDataGateway::default()
        }),
    );

    let enriched = service
        .load_enriched_page(AuditLogQuery::default())
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));

    assert_eq!(enriched.len(), 2);
    assert!(enriched[0].actor.is_some());
    assert!(enriched[0].target_details.is_none());
    assert!(enriched[1].target_details.is_some());
}

#[tokio::test]
async fn failed_page_fetch_is_an_error() {
    let service = AuditLogService::new(
        Arc::new(FakeAuditLogGateway {
            entries: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }),
        Arc::new(FakeReferenceDataGateway::default()),
    );

    let result = service.load_enriched_page(AuditLogQuery::default()).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn invalid_query_is_rejected_before_fetching() {
    let audit_gateway = Arc::new(FakeAuditLogGateway::with_entries(page()));
    let service = AuditLogService::new(
        audit_gateway.clone(),
        Arc::new(FakeReferenceDataGateway::default()),
    );

    let result = service.load_enriched_page(AuditLogQuery::page(500, 0)).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(audit_gateway.queries.lock().await.is_empty());
}

#[tokio::test]
async fn cached_reference_data_skips_refetch() {
    let reference_gateway = Arc::new(FakeReferenceDataGateway {
        data: reference_data(),
        ..FakeReferenceDataGateway::default()
    });
    let cache = Arc::new(FakeReferenceDataCache::default());
    let service = AuditLogService::new(
        Arc::new(FakeAuditLogGateway::with_entries(page())),
        reference_gateway.clone(),
    )
    .with_reference_cache(cache.clone(), 60);

    let first = service
        .load_enriched_page(AuditLogQuery::default())
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));
    let second = service
        .load_enriched_page(AuditLogQuery::default())
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));

    assert_eq!(first, second);
    assert_eq!(*reference_gateway.fetch_count.lock().await, 1);
    assert_eq!(
        cache.stored.lock().await.as_ref().map(|(_, ttl)| *ttl),
        Some(60)
    );
}

#[tokio::test]
async fn partial_reference_data_is_not_cached() {
    let reference_gateway = Arc::new(FakeReferenceDataGateway {
        data: reference_data(),
        failing_users: true,
        ..FakeReferenceDataGateway::default()
    });
    let cache = Arc::new(FakeReferenceDataCache::default());
    let service = AuditLogService::new(
        Arc::new(FakeAuditLogGateway::with_entries(page())),
        reference_gateway.clone(),
    )
    .with_reference_cache(cache.clone(), 60);

    let enriched = service
        .load_enriched_page(AuditLogQuery::default())
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));
    let _ = service
        .load_enriched_page(AuditLogQuery::default())
        .await
        .unwrap_or_else(|error| panic!("page should load: {error}"));

    assert!(enriched[0].actor.is_none());
    assert!(cache.stored.lock().await.is_none());
    assert_eq!(*reference_gateway.fetch_count.lock().await, 2);
}

#[tokio::test]
async fn consecutive_pages_share_cached_reference_data() {
    let audit_gateway = Arc::new(FakeAuditLogGateway::with_entries(page()));
    let reference_gateway = Arc::new(FakeReferenceDataGateway {
        data: reference_data(),
        ..FakeReferenceDataGateway::default()
    });
    let service = AuditLogService::new(audit_gateway.clone(), reference_gateway.clone())
        .with_reference_cache(Arc::new(FakeReferenceDataCache::default()), 60);

    let enriched = service
        .load_enriched_pages(AuditLogQuery::page(2, 10), 3)
        .await
        .unwrap_or_else(|error| panic!("pages should load: {error}"));

    assert_eq!(enriched.len(), 6);
    assert!(enriched.iter().all(|item| item.target_details.is_some()));
    assert_eq!(*reference_gateway.fetch_count.lock().await, 1);

    let offsets: Vec<usize> = audit_gateway
        .queries
        .lock()
        .await
        .iter()
        .map(|query| query.offset)
        .collect();
    assert_eq!(offsets, vec![10, 12, 14]);
}

#[tokio::test]
async fn short_page_stops_loading() {
    let audit_gateway = Arc::new(FakeAuditLogGateway::with_entries(page()));
    let service = AuditLogService::new(
        audit_gateway.clone(),
        Arc::new(FakeReferenceDataGateway::default()),
    );

    let enriched = service
        .load_enriched_pages(AuditLogQuery::page(5, 0), 4)
        .await
        .unwrap_or_else(|error| panic!("pages should load: {error}"));

    assert_eq!(enriched.len(), 2);
    assert_eq!(audit_gateway.queries.lock().await.len(), 1);
}

#[tokio::test]
async fn zero_pages_is_rejected() {
    let service = AuditLogService::new(
        Arc::new(FakeAuditLogGateway::with_entries(page())),
        Arc::new(FakeReferenceDataGateway::default()),
    );

    let result = service
        .load_enriched_pages(AuditLogQuery::default(), 0)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}
