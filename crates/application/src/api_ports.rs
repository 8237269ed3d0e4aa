mod audit;
mod cache;
mod credentials;
mod occurrence;
mod reference;

pub use audit::{AuditLogGateway, AuditLogQuery, MAX_AUDIT_PAGE_SIZE};
pub use cache::ReferenceDataCache;
pub use credentials::CredentialProvider;
pub use occurrence::OccurrenceGateway;
pub use reference::ReferenceDataGateway;
