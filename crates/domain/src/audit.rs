//! Raw audit-log records.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use ocorrencias_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Kind of entity an audit entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditTargetType {
    /// An occurrence.
    #[serde(rename = "ocorrencia")]
    Occurrence,
    /// A user account.
    #[serde(rename = "user")]
    User,
    /// A subtask nested in an occurrence.
    #[serde(rename = "subtarefa")]
    Subtask,
    /// A sector.
    #[serde(rename = "setor")]
    Sector,
    /// A status definition.
    #[serde(rename = "status")]
    Status,
    /// A workflow.
    #[serde(rename = "workflow")]
    Workflow,
    /// A status history entry nested in an occurrence.
    #[serde(rename = "historico_status")]
    StatusHistory,
}

impl AuditTargetType {
    /// Returns the stable transport value for this target type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Occurrence => "ocorrencia",
            Self::User => "user",
            Self::Subtask => "subtarefa",
            Self::Sector => "setor",
            Self::Status => "status",
            Self::Workflow => "workflow",
            Self::StatusHistory => "historico_status",
        }
    }

    /// Returns all known target types.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AuditTargetType] = &[
            AuditTargetType::Occurrence,
            AuditTargetType::User,
            AuditTargetType::Subtask,
            AuditTargetType::Sector,
            AuditTargetType::Status,
            AuditTargetType::Workflow,
            AuditTargetType::StatusHistory,
        ];

        ALL
    }
}

impl FromStr for AuditTargetType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|target_type| target_type.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown audit target type '{value}'")))
    }
}

impl Display for AuditTargetType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Audit action in `verb_noun` form, e.g. `update_status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuditAction(String);

impl AuditAction {
    /// Creates an audit action, rejecting blank values.
    ///
    /// The value is kept as given.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "audit action must not be empty".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the full action value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the verb part, the text before the first `_`.
    #[must_use]
    pub fn verb(&self) -> &str {
        self.0
            .split_once('_')
            .map_or(self.0.as_str(), |(verb, _)| verb)
    }

    /// Returns the noun part, empty when the action has no `_`.
    #[must_use]
    pub fn noun(&self) -> &str {
        self.0.split_once('_').map_or("", |(_, noun)| noun)
    }
}

impl TryFrom<String> for AuditAction {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuditAction> for String {
    fn from(value: AuditAction) -> Self {
        value.0
    }
}

impl Display for AuditAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Immutable record of one state-changing action.
///
/// Decoding fails for a blank `action` or an unknown `targetType`, so one such
/// entry fails the whole page it arrives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Entry identifier.
    pub id: i64,
    /// Acting user; `None` for system-initiated actions.
    #[serde(default)]
    pub actor_id: Option<i64>,
    /// Action performed.
    pub action: AuditAction,
    /// Kind of entity affected.
    pub target_type: AuditTargetType,
    /// Identifier of the affected entity.
    pub target_id: i64,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
