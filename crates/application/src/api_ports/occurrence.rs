use async_trait::async_trait;
use ocorrencias_core::AppResult;
use ocorrencias_domain::OccurrenceRef;

/// Backend port for occurrence mutations.
#[async_trait]
pub trait OccurrenceGateway: Send + Sync {
    /// Moves one occurrence to another status and returns the updated record.
    async fn update_occurrence_status(
        &self,
        occurrence_id: i64,
        status_id: i64,
    ) -> AppResult<OccurrenceRef>;

    /// Marks one subtask done or pending and returns the owning occurrence.
    async fn set_subtask_done(
        &self,
        occurrence_id: i64,
        subtask_id: i64,
        done: bool,
    ) -> AppResult<OccurrenceRef>;
}
