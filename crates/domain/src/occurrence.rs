//! Occurrences (tickets) and the statuses they move through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::organization::{UserRef, WorkflowRef};

/// Occurrence status.
///
/// Nested status objects on occurrences usually carry only `id` and `nome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRef {
    /// Status identifier.
    pub id: i64,
    /// Display label, also the kanban grouping key.
    #[serde(rename = "nome")]
    pub name: String,
    /// Optional stable machine key.
    #[serde(rename = "chave", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Optional board position configured on the backend.
    #[serde(rename = "ordem", default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl StatusRef {
    /// Creates a status carrying only identifier and label.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            key: None,
            order: None,
        }
    }
}

/// Checklist item nested in an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Subtask identifier.
    pub id: i64,
    /// Title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Whether the item was completed.
    #[serde(rename = "concluida", default)]
    pub done: bool,
}

/// One recorded status change of an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// History entry identifier.
    pub id: i64,
    /// Status before the change.
    #[serde(
        rename = "statusAnterior",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_status: Option<StatusRef>,
    /// Status after the change.
    #[serde(rename = "statusNovo", default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<StatusRef>,
    /// When the change happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Trackable ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceRef {
    /// Occurrence identifier.
    pub id: i64,
    /// Title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Free-form description.
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current status; `None` when the backend has not assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusRef>,
    /// Assigned collaborator.
    #[serde(rename = "colaborador", default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<UserRef>,
    /// Workflow the occurrence belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowRef>,
    /// Checklist items.
    #[serde(rename = "subtarefas", default)]
    pub subtasks: Vec<Subtask>,
    /// Status change history.
    #[serde(rename = "historicos", default)]
    pub history: Vec<HistoryEntry>,
}

impl OccurrenceRef {
    /// Creates an occurrence with only identifier and title populated.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: None,
            collaborator: None,
            workflow: None,
            subtasks: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Sets the current status.
    #[must_use]
    pub fn with_status(mut self, status: StatusRef) -> Self {
        self.status = Some(status);
        self
    }

}

#[cfg(test)]
mod tests {
    use super::{OccurrenceRef, StatusRef};

    #[test]
    fn occurrence_defaults_nested_collections() {
        let occurrence: OccurrenceRef = serde_json::from_value(serde_json::json!({
            "id": 3,
            "titulo": "Impressora travada",
            "status": { "id": 1, "nome": "Em Fila" }
        }))
        .unwrap_or_else(|error| panic!("occurrence should decode: {error}"));

        assert!(occurrence.subtasks.is_empty());
        assert!(occurrence.history.is_empty());
        assert_eq!(occurrence.status, Some(StatusRef::new(1, "Em Fila")));
    }

    #[test]
    fn history_decodes_status_pair() {
        let occurrence: OccurrenceRef = serde_json::from_value(serde_json::json!({
            "id": 3,
            "titulo": "Rede lenta",
            "historicos": [{
                "id": 40,
                "statusAnterior": { "id": 1, "nome": "Em Fila" },
                "statusNovo": { "id": 2, "nome": "Em Andamento" },
                "createdAt": "2024-05-01T12:00:00Z"
            }]
        }))
        .unwrap_or_else(|error| panic!("occurrence should decode: {error}"));

        let entry = &occurrence.history[0];
        assert_eq!(
            entry.new_status.as_ref().map(|status| status.name.as_str()),
            Some("Em Andamento")
        );
        assert!(entry.created_at.is_some());
    }
}
