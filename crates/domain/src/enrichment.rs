//! Resolution of actor and target ids in audit entries against reference data.
//!
//! Enrichment is a pure join over collections the caller already fetched. A
//! lookup miss leaves the optional field empty; it is never an error.

use std::collections::HashMap;

use serde::Serialize;

use crate::audit::{AuditLogEntry, AuditTargetType};
use crate::occurrence::{OccurrenceRef, StatusRef};
use crate::organization::{SectorRef, UserProfile, UserRef, WorkflowRef};

/// Reference collections used to resolve audit entry ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    /// Known users.
    pub users: Vec<UserRef>,
    /// Known occurrences, including nested subtasks and history.
    pub occurrences: Vec<OccurrenceRef>,
    /// Known statuses.
    pub statuses: Vec<StatusRef>,
    /// Known sectors.
    pub sectors: Vec<SectorRef>,
    /// Known workflows.
    pub workflows: Vec<WorkflowRef>,
}

/// Display data for the user who performed an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorSummary {
    /// User identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Access profile.
    #[serde(rename = "perfil")]
    pub profile: UserProfile,
    /// Sector resolved from the sector collection.
    #[serde(rename = "setor", skip_serializing_if = "Option::is_none")]
    pub sector: Option<SectorRef>,
}

/// Display data for the entity an action affected, shaped by its target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TargetDetails {
    /// Projection of an occurrence.
    Occurrence {
        /// Occurrence title.
        #[serde(rename = "titulo")]
        title: String,
        /// Current status label.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        /// Assigned collaborator name.
        #[serde(rename = "colaborador", skip_serializing_if = "Option::is_none")]
        collaborator: Option<String>,
    },
    /// Projection of a user.
    User {
        /// Display name.
        #[serde(rename = "nome")]
        name: String,
        /// Contact email.
        email: String,
        /// Access profile.
        #[serde(rename = "perfil")]
        profile: UserProfile,
    },
    /// Projection of a subtask and the occurrence that owns it.
    Subtask {
        /// Subtask title.
        #[serde(rename = "titulo")]
        title: String,
        /// Completion flag.
        #[serde(rename = "concluida")]
        done: bool,
        /// Owning occurrence identifier.
        #[serde(rename = "ocorrenciaId")]
        occurrence_id: i64,
        /// Owning occurrence title.
        #[serde(rename = "ocorrenciaTitulo")]
        occurrence_title: String,
    },
    /// Projection of a sector.
    Sector {
        /// Display name.
        #[serde(rename = "nome")]
        name: String,
    },
    /// Projection of a status.
    Status {
        /// Display label.
        #[serde(rename = "nome")]
        name: String,
        /// Machine key.
        #[serde(rename = "chave", skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
    /// Projection of a workflow.
    Workflow {
        /// Display name.
        #[serde(rename = "nome")]
        name: String,
    },
    /// Projection of a status history entry and the occurrence that owns it.
    StatusHistory {
        /// Owning occurrence identifier.
        #[serde(rename = "ocorrenciaId")]
        occurrence_id: i64,
        /// Owning occurrence title.
        #[serde(rename = "ocorrenciaTitulo")]
        occurrence_title: String,
        /// Label of the status before the change.
        #[serde(rename = "statusAnterior", skip_serializing_if = "Option::is_none")]
        previous_status: Option<String>,
        /// Label of the status after the change.
        #[serde(rename = "statusNovo", skip_serializing_if = "Option::is_none")]
        new_status: Option<String>,
    },
}

/// Audit entry with resolved actor and target display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAuditLogEntry {
    /// Original entry.
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    /// Resolved actor; `None` means a system action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorSummary>,
    /// Resolved target; `None` means the consumer shows `#<targetId>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_details: Option<TargetDetails>,
}

impl EnrichedAuditLogEntry {
    /// Returns whether the entry was recorded without a resolvable actor.
    #[must_use]
    pub fn is_system_action(&self) -> bool {
        self.actor.is_none()
    }
}

struct ReferenceIndex<'a> {
    users: HashMap<i64, &'a UserRef>,
    occurrences: HashMap<i64, &'a OccurrenceRef>,
    statuses: HashMap<i64, &'a StatusRef>,
    sectors: HashMap<i64, &'a SectorRef>,
    workflows: HashMap<i64, &'a WorkflowRef>,
    all_occurrences: &'a [OccurrenceRef],
}

impl<'a> ReferenceIndex<'a> {
    fn build(reference_data: &'a ReferenceData) -> Self {
        Self {
            users: index_by_id(&reference_data.users, |user| user.id),
            occurrences: index_by_id(&reference_data.occurrences, |occurrence| occurrence.id),
            statuses: index_by_id(&reference_data.statuses, |status| status.id),
            sectors: index_by_id(&reference_data.sectors, |sector| sector.id),
            workflows: index_by_id(&reference_data.workflows, |workflow| workflow.id),
            all_occurrences: reference_data.occurrences.as_slice(),
        }
    }

    fn resolve_actor(&self, actor_id: Option<i64>) -> Option<ActorSummary> {
        let user = self.users.get(&actor_id?)?;
        let sector = user
            .sector
            .as_ref()
            .and_then(|sector| self.sectors.get(&sector.id))
            .map(|sector| (*sector).clone());

        Some(ActorSummary {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            profile: user.profile,
            sector,
        })
    }

    fn resolve_target(
        &self,
        target_type: AuditTargetType,
        target_id: i64,
    ) -> Option<TargetDetails> {
        match target_type {
            AuditTargetType::Occurrence => {
                let occurrence = self.occurrences.get(&target_id)?;
                Some(TargetDetails::Occurrence {
                    title: occurrence.title.clone(),
                    status: occurrence.status.as_ref().map(|status| status.name.clone()),
                    collaborator: occurrence.collaborator.as_ref().map(|user| user.name.clone()),
                })
            }
            AuditTargetType::User => {
                let user = self.users.get(&target_id)?;
                Some(TargetDetails::User {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    profile: user.profile,
                })
            }
            AuditTargetType::Subtask => {
                self.all_occurrences.iter().find_map(|occurrence| {
                    occurrence
                        .subtasks
                        .iter()
                        .find(|subtask| subtask.id == target_id)
                        .map(|subtask| TargetDetails::Subtask {
                            title: subtask.title.clone(),
                            done: subtask.done,
                            occurrence_id: occurrence.id,
                            occurrence_title: occurrence.title.clone(),
                        })
                })
            }
            AuditTargetType::Sector => {
                let sector = self.sectors.get(&target_id)?;
                Some(TargetDetails::Sector {
                    name: sector.name.clone(),
                })
            }
            AuditTargetType::Status => {
                let status = self.statuses.get(&target_id)?;
                Some(TargetDetails::Status {
                    name: status.name.clone(),
                    key: status.key.clone(),
                })
            }
            AuditTargetType::Workflow => {
                let workflow = self.workflows.get(&target_id)?;
                Some(TargetDetails::Workflow {
                    name: workflow.name.clone(),
                })
            }
            AuditTargetType::StatusHistory => {
                self.all_occurrences.iter().find_map(|occurrence| {
                    occurrence
                        .history
                        .iter()
                        .find(|entry| entry.id == target_id)
                        .map(|entry| TargetDetails::StatusHistory {
                            occurrence_id: occurrence.id,
                            occurrence_title: occurrence.title.clone(),
                            previous_status: entry
                                .previous_status
                                .as_ref()
                                .map(|status| status.name.clone()),
                            new_status: entry.new_status.as_ref().map(|status| status.name.clone()),
                        })
                })
            }
        }
    }
}

// First occurrence of an id wins, matching a left-to-right lookup.
fn index_by_id<'a, T>(items: &'a [T], id_of: impl Fn(&T) -> i64) -> HashMap<i64, &'a T> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(id_of(item)).or_insert(item);
    }
    index
}

/// Resolves actor and target display data for a page of audit entries.
///
/// The output has the same length and order as `entries`. Inputs are only
/// borrowed; nested subtasks and history are found by scanning occurrences.
#[must_use]
pub fn enrich_audit_entries(
    entries: &[AuditLogEntry],
    reference_data: &ReferenceData,
) -> Vec<EnrichedAuditLogEntry> {
    let index = ReferenceIndex::build(reference_data);

    entries
        .iter()
        .map(|entry| EnrichedAuditLogEntry {
            entry: entry.clone(),
            actor: index.resolve_actor(entry.actor_id),
            target_details: index.resolve_target(entry.target_type, entry.target_id),
        })
        .collect()
}
