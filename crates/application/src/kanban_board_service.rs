use std::sync::Arc;

use ocorrencias_core::{AppError, AppResult};
use ocorrencias_domain::{
    KanbanColumn, NO_STATUS_LABEL, OccurrenceRef, filter_by_workflow, group_by_status,
    order_columns_by_status, slugify,
};
use tracing::{debug, info, warn};

use crate::api_ports::{OccurrenceGateway, ReferenceDataGateway};

/// Column ordering applied to a loaded board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnOrdering {
    /// Columns appear in the order their status is first seen.
    #[default]
    FirstSeen,
    /// Columns follow the backend `ordem` of their status.
    StatusOrder,
}

/// Kanban board use-case: loads columns and applies card moves.
#[derive(Clone)]
pub struct KanbanBoardService {
    reference_gateway: Arc<dyn ReferenceDataGateway>,
    occurrence_gateway: Arc<dyn OccurrenceGateway>,
    column_ordering: ColumnOrdering,
}

impl KanbanBoardService {
    /// Creates a board service with first-seen column ordering.
    #[must_use]
    pub fn new(
        reference_gateway: Arc<dyn ReferenceDataGateway>,
        occurrence_gateway: Arc<dyn OccurrenceGateway>,
    ) -> Self {
        Self {
            reference_gateway,
            occurrence_gateway,
            column_ordering: ColumnOrdering::FirstSeen,
        }
    }

    /// Overrides the column ordering.
    #[must_use]
    pub fn with_column_ordering(mut self, column_ordering: ColumnOrdering) -> Self {
        self.column_ordering = column_ordering;
        self
    }

    /// Loads board columns, optionally restricted to one workflow.
    pub async fn load_board(&self, workflow_id: Option<i64>) -> AppResult<Vec<KanbanColumn>> {
        let occurrences = self.reference_gateway.list_occurrences().await?;
        let occurrences = match workflow_id {
            Some(workflow_id) => filter_by_workflow(occurrences, workflow_id),
            None => occurrences,
        };

        let columns = group_by_status(&occurrences);
        debug!(
            workflow_id = ?workflow_id,
            occurrence_count = occurrences.len(),
            column_count = columns.len(),
            "grouped kanban board"
        );

        match self.column_ordering {
            ColumnOrdering::FirstSeen => Ok(columns),
            ColumnOrdering::StatusOrder => {
                let statuses = match self.reference_gateway.list_statuses().await {
                    Ok(statuses) => statuses,
                    Err(error) => {
                        warn!(
                            error = %error,
                            "statuses unavailable, keeping first-seen column order"
                        );
                        Vec::new()
                    }
                };
                Ok(order_columns_by_status(columns, &statuses))
            }
        }
    }

    /// Moves an occurrence to the status behind a board column.
    pub async fn move_card(
        &self,
        occurrence_id: i64,
        target_column_id: &str,
    ) -> AppResult<OccurrenceRef> {
        if target_column_id == slugify(NO_STATUS_LABEL) {
            return Err(AppError::Validation(format!(
                "occurrence {occurrence_id} cannot be moved to the '{NO_STATUS_LABEL}' column"
            )));
        }

        let statuses = self.reference_gateway.list_statuses().await?;
        let status = statuses
            .iter()
            .find(|status| slugify(&status.name) == target_column_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("no status matches column '{target_column_id}'"))
            })?;

        let updated = self
            .occurrence_gateway
            .update_occurrence_status(occurrence_id, status.id)
            .await?;

        info!(
            occurrence_id,
            status_id = status.id,
            column_id = %target_column_id,
            "occurrence moved"
        );

        Ok(updated)
    }

    /// Marks one subtask done or pending.
    pub async fn set_subtask_done(
        &self,
        occurrence_id: i64,
        subtask_id: i64,
        done: bool,
    ) -> AppResult<OccurrenceRef> {
        let updated = self
            .occurrence_gateway
            .set_subtask_done(occurrence_id, subtask_id, done)
            .await?;

        info!(occurrence_id, subtask_id, done, "subtask updated");

        Ok(updated)
    }
}
