use async_trait::async_trait;
use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::{AuditLogEntry, AuditTargetType};

/// Largest audit page the backend serves in one request.
pub const MAX_AUDIT_PAGE_SIZE: usize = 50;

/// Query parameters for one audit log page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional action filter, e.g. `update_status`.
    pub action: Option<String>,
    /// Optional actor filter.
    pub actor_id: Option<i64>,
    /// Optional target type filter.
    pub target_type: Option<AuditTargetType>,
}

impl AuditLogQuery {
    /// Creates an unfiltered query for one page.
    #[must_use]
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            action: None,
            actor_id: None,
            target_type: None,
        }
    }

    /// Checks the page size against backend limits.
    pub fn validate(&self) -> AppResult<()> {
        if self.limit == 0 || self.limit > MAX_AUDIT_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "audit page limit must be between 1 and {MAX_AUDIT_PAGE_SIZE}, got {}",
                self.limit
            )));
        }

        if self
            .action
            .as_deref()
            .is_some_and(|action| action.trim().is_empty())
        {
            return Err(AppError::Validation(
                "audit action filter must not be blank".to_owned(),
            ));
        }

        Ok(())
    }
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self::page(MAX_AUDIT_PAGE_SIZE, 0)
    }
}

/// Backend port for reading audit log pages.
#[async_trait]
pub trait AuditLogGateway: Send + Sync {
    /// Lists one page of audit entries, most recent first.
    async fn list_audit_logs(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>>;
}
