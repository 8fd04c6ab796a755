use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "secretaire")]
    Secretary,
    #[serde(rename = "cadre")]
    Manager,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Secretary => "secretaire",
            Role::Manager => "cadre",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved caller, supplied by the identity collaborator. The core never
/// checks credentials; the calling layer gates manager-only operations on
/// [`Actor::is_manager`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub service_id: Option<String>,
}

impl Actor {
    pub fn is_manager(&self) -> bool {
        matches!(self.role, Role::Manager)
    }
}
