use async_trait::async_trait;
use ocorrencias_application::CredentialProvider;
use ocorrencias_core::{AccessToken, AppResult};

/// Credential provider holding one token fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    token: Option<AccessToken>,
}

impl StaticCredentialProvider {
    /// Creates a provider that always returns `token`.
    #[must_use]
    pub fn new(token: Option<AccessToken>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn access_token(&self) -> AppResult<Option<AccessToken>> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use ocorrencias_application::CredentialProvider;
    use ocorrencias_core::AccessToken;

    use super::StaticCredentialProvider;

    #[tokio::test]
    async fn returns_configured_token() {
        let token = AccessToken::new("secret").unwrap_or_else(|_| panic!("test"));
        let provider = StaticCredentialProvider::new(Some(token.clone()));

        let resolved = provider
            .access_token()
            .await
            .unwrap_or_else(|error| panic!("token should resolve: {error}"));

        assert_eq!(resolved, Some(token));
    }

    #[tokio::test]
    async fn anonymous_provider_has_no_token() {
        let resolved = StaticCredentialProvider::new(None)
            .access_token()
            .await
            .unwrap_or_else(|error| panic!("token should resolve: {error}"));

        assert!(resolved.is_none());
    }
}
