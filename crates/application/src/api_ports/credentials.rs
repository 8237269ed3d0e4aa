use async_trait::async_trait;
use ocorrencias_core::{AccessToken, AppResult};

/// Source of the bearer token sent with every backend request.
///
/// Injected into API adapters at construction time.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current token, or `None` for anonymous requests.
    async fn access_token(&self) -> AppResult<Option<AccessToken>>;
}
