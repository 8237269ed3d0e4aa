use async_trait::async_trait;
use ocorrencias_core::AppResult;
use ocorrencias_domain::{OccurrenceRef, SectorRef, StatusRef, UserRef, WorkflowRef};

/// Backend port for the collections audit and board views join against.
#[async_trait]
pub trait ReferenceDataGateway: Send + Sync {
    /// Lists all users.
    async fn list_users(&self) -> AppResult<Vec<UserRef>>;

    /// Lists all occurrences with nested subtasks and history.
    async fn list_occurrences(&self) -> AppResult<Vec<OccurrenceRef>>;

    /// Lists all statuses.
    async fn list_statuses(&self) -> AppResult<Vec<StatusRef>>;

    /// Lists all sectors.
    async fn list_sectors(&self) -> AppResult<Vec<SectorRef>>;

    /// Lists all workflows.
    async fn list_workflows(&self) -> AppResult<Vec<WorkflowRef>>;
}
