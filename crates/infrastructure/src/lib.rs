//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_api_client;
mod in_memory_reference_data_cache;
mod static_credential_provider;

pub use http_api_client::HttpApiClient;
pub use in_memory_reference_data_cache::InMemoryReferenceDataCache;
pub use static_credential_provider::StaticCredentialProvider;
