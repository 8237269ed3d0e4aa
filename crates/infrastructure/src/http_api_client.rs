use std::sync::Arc;

use async_trait::async_trait;
use ocorrencias_application::{
    AuditLogGateway, AuditLogQuery, CredentialProvider, OccurrenceGateway, ReferenceDataGateway,
};
use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::{AuditLogEntry, OccurrenceRef, SectorRef, StatusRef, UserRef, WorkflowRef};
use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Collection payload, either a bare array or wrapped in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CollectionResponse<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

impl<T> CollectionResponse<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Envelope { data: items } => items,
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateOccurrenceStatusRequest {
    #[serde(rename = "statusId")]
    status_id: i64,
}

#[derive(Debug, Serialize)]
struct UpdateSubtaskRequest {
    #[serde(rename = "concluida")]
    done: bool,
}

/// REST adapter for the occurrence backend.
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: String,
    credential_provider: Arc<dyn CredentialProvider>,
}

impl HttpApiClient {
    /// Creates a client for the backend rooted at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        credential_provider: Arc<dyn CredentialProvider>,
    ) -> AppResult<Self> {
        let parsed = Url::parse(base_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{base_url}': {error}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "API base URL '{base_url}' must use http or https"
            )));
        }

        Ok(Self {
            http_client,
            base_url: parsed.as_str().trim_end_matches('/').to_owned(),
            credential_provider,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path)).map_err(|error| {
            AppError::Internal(format!("failed to build endpoint for '{path}': {error}"))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        builder: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> AppResult<T> {
        let builder = match self.credential_provider.access_token().await? {
            Some(token) => builder.header(header::AUTHORIZATION, token.bearer_header()),
            None => builder,
        };

        debug!(method = %method, endpoint = %endpoint, "calling backend");

        let response = builder.send().await.map_err(|error| {
            AppError::Internal(format!("failed to call '{endpoint}': {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(status_error(status, endpoint, body));
        }

        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to parse response body from '{endpoint}': {error}"
            ))
        })
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let url = self.endpoint(path, query)?;
        let endpoint = url.to_string();
        let response: CollectionResponse<T> = self
            .execute(Method::GET, self.http_client.get(url), &endpoint)
            .await?;
        Ok(response.into_items())
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint(path, &[])?;
        let endpoint = url.to_string();
        let builder = self.http_client.patch(url).json(body);
        self.execute(Method::PATCH, builder, &endpoint).await
    }
}

fn status_error(status: StatusCode, endpoint: &str, body: String) -> AppError {
    let message = format!("'{endpoint}' returned status {}: {body}", status.as_u16());
    match status.as_u16() {
        400 | 422 => AppError::Validation(message),
        401 => AppError::Unauthorized(message),
        403 => AppError::Forbidden(message),
        404 => AppError::NotFound(message),
        409 => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}

fn audit_query_pairs(query: &AuditLogQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("limit", query.limit.to_string()),
        ("offset", query.offset.to_string()),
    ];
    if let Some(action) = &query.action {
        pairs.push(("action", action.clone()));
    }
    if let Some(actor_id) = query.actor_id {
        pairs.push(("actorId", actor_id.to_string()));
    }
    if let Some(target_type) = query.target_type {
        pairs.push(("targetType", target_type.as_str().to_owned()));
    }
    pairs
}

#[async_trait]
impl AuditLogGateway for HttpApiClient {
    async fn list_audit_logs(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        self.get_collection("audit-logs", &audit_query_pairs(&query))
            .await
    }
}

#[async_trait]
impl ReferenceDataGateway for HttpApiClient {
    async fn list_users(&self) -> AppResult<Vec<UserRef>> {
        self.get_collection("users", &[]).await
    }

    async fn list_occurrences(&self) -> AppResult<Vec<OccurrenceRef>> {
        self.get_collection("ocorrencias", &[]).await
    }

    async fn list_statuses(&self) -> AppResult<Vec<StatusRef>> {
        self.get_collection("status", &[]).await
    }

    async fn list_sectors(&self) -> AppResult<Vec<SectorRef>> {
        self.get_collection("setores", &[]).await
    }

    async fn list_workflows(&self) -> AppResult<Vec<WorkflowRef>> {
        self.get_collection("workflows", &[]).await
    }
}

#[async_trait]
impl OccurrenceGateway for HttpApiClient {
    async fn update_occurrence_status(
        &self,
        occurrence_id: i64,
        status_id: i64,
    ) -> AppResult<OccurrenceRef> {
        self.patch(
            &format!("ocorrencias/{occurrence_id}"),
            &UpdateOccurrenceStatusRequest { status_id },
        )
        .await
    }

    async fn set_subtask_done(
        &self,
        occurrence_id: i64,
        subtask_id: i64,
        done: bool,
    ) -> AppResult<OccurrenceRef> {
        self.patch(
            &format!("ocorrencias/{occurrence_id}/subtarefas/{subtask_id}"),
            &UpdateSubtaskRequest { done },
        )
        .await
    }
}
