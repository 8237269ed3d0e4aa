//! Application services and ports.

#![forbid(unsafe_code)]

mod api_ports;
mod audit_log_service;
mod kanban_board_service;

pub use api_ports::{
    AuditLogGateway, AuditLogQuery, CredentialProvider, MAX_AUDIT_PAGE_SIZE, OccurrenceGateway,
    ReferenceDataCache, ReferenceDataGateway,
};
pub use audit_log_service::AuditLogService;
pub use kanban_board_service::{ColumnOrdering, KanbanBoardService};
