//! Users, sectors and workflows as returned by the backend.

use serde::{Deserialize, Serialize};

/// Access profile of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserProfile {
    /// Full administrative access.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Manages sectors, workflows and their occurrences.
    #[serde(rename = "GESTOR")]
    Manager,
    /// Works on occurrences assigned to them.
    #[serde(rename = "COLABORADOR")]
    Collaborator,
}

/// Organizational department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRef {
    /// Sector identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// User account summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
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
    /// Sector the user belongs to, when assigned.
    #[serde(rename = "setor", default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<SectorRef>,
}

/// Named scope restricting which occurrences a user works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRef {
    /// Workflow identifier.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}
