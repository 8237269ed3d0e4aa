//! Domain entities and the pure transforms behind the audit and board views.

#![forbid(unsafe_code)]

mod audit;
mod enrichment;
mod kanban;
mod occurrence;
mod organization;

pub use audit::{AuditAction, AuditLogEntry, AuditTargetType};
pub use enrichment::{
    ActorSummary, EnrichedAuditLogEntry, ReferenceData, TargetDetails, enrich_audit_entries,
};
pub use kanban::{
    KanbanCard, KanbanColumn, NO_COLLABORATOR_LABEL, NO_STATUS_LABEL, filter_by_workflow,
    group_by_status, order_columns_by_status, slugify,
};
pub use occurrence::{HistoryEntry, OccurrenceRef, StatusRef, Subtask};
pub use organization::{SectorRef, UserProfile, UserRef, WorkflowRef};
