//! Kanban board columns derived from a flat occurrence list.

use std::collections::HashMap;

use serde::Serialize;

use crate::occurrence::{OccurrenceRef, StatusRef};

/// Column label used for occurrences without a status.
pub const NO_STATUS_LABEL: &str = "Sem status";

/// Card label used for occurrences without an assigned collaborator.
pub const NO_COLLABORATOR_LABEL: &str = "Sem responsável";

/// One occurrence rendered as a board card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    /// Card identifier, the occurrence id as text.
    pub id: String,
    /// Occurrence title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Occurrence description.
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned collaborator name.
    #[serde(rename = "colaboradorNome")]
    pub collaborator_name: String,
    /// Source occurrence.
    pub occurrence: OccurrenceRef,
}

impl KanbanCard {
    fn from_occurrence(occurrence: &OccurrenceRef) -> Self {
        Self {
            id: occurrence.id.to_string(),
            title: occurrence.title.clone(),
            description: occurrence.description.clone(),
            collaborator_name: occurrence
                .collaborator
                .as_ref()
                .map_or_else(|| NO_COLLABORATOR_LABEL.to_owned(), |user| user.name.clone()),
            occurrence: occurrence.clone(),
        }
    }
}

/// Board column holding every occurrence in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KanbanColumn {
    /// Column identifier, the slug of the status label.
    pub id: String,
    /// Status label of the first occurrence seen in this column.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Cards in input order.
    pub cards: Vec<KanbanCard>,
}

/// Normalizes a status label into a column identifier.
///
/// Lowercases the label and joins its whitespace-separated words with single
/// hyphens. Leading and trailing whitespace is dropped, so labels differing
/// only in case or spacing produce the same slug.
#[must_use]
pub fn slugify(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Groups occurrences into status columns in first-seen order.
///
/// Every occurrence lands in exactly one column. Occurrences without a status
/// go to the [`NO_STATUS_LABEL`] column. Empty input yields no columns.
#[must_use]
pub fn group_by_status(occurrences: &[OccurrenceRef]) -> Vec<KanbanColumn> {
    let mut columns: Vec<KanbanColumn> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for occurrence in occurrences {
        let label = occurrence
            .status
            .as_ref()
            .map_or(NO_STATUS_LABEL, |status| status.name.as_str());
        let column_id = slugify(label);

        let position = *positions.entry(column_id.clone()).or_insert_with(|| {
            columns.push(KanbanColumn {
                id: column_id,
                title: label.to_owned(),
                cards: Vec::new(),
            });
            columns.len() - 1
        });

        columns[position]
            .cards
            .push(KanbanCard::from_occurrence(occurrence));
    }

    columns
}

/// Reorders columns by the `ordem` of the status whose slug matches each column.
///
/// Columns with a known position come first in ascending order; the rest keep
/// their relative order after them.
#[must_use]
pub fn order_columns_by_status(
    mut columns: Vec<KanbanColumn>,
    statuses: &[StatusRef],
) -> Vec<KanbanColumn> {
    let mut positions: HashMap<String, i32> = HashMap::new();
    for status in statuses {
        if let Some(order) = status.order {
            positions.entry(slugify(&status.name)).or_insert(order);
        }
    }

    columns.sort_by_key(|column| match positions.get(&column.id) {
        Some(order) => (false, *order),
        None => (true, 0),
    });
    columns
}

/// Keeps the occurrences belonging to one workflow, in input order.
#[must_use]
pub fn filter_by_workflow(occurrences: Vec<OccurrenceRef>, workflow_id: i64) -> Vec<OccurrenceRef> {
    occurrences
        .into_iter()
        .filter(|occurrence| {
            occurrence
                .workflow
                .as_ref()
                .is_some_and(|workflow| workflow.id == workflow_id)
        })
        .collect()
}
