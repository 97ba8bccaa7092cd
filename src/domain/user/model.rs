//! User domain entity

use serde::{Deserialize, Serialize};

/// User role.
///
/// Stored with the Spanish labels used by the `usuarios.rol` check constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador")]
    Administrator,
    #[serde(rename = "perito")]
    Perito,
    #[serde(rename = "supervisor")]
    Supervisor,
}

impl Role {
    /// Roles allowed to create reports
    pub const REPORT_AUTHORS: [Role; 2] = [Role::Administrator, Role::Perito];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrador",
            Self::Perito => "perito",
            Self::Supervisor => "supervisor",
        }
    }

    pub fn can_author_reports(&self) -> bool {
        match self {
            Self::Administrator | Self::Perito => true,
            Self::Supervisor => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    /// Stored and compared as plaintext.
    pub password: String,
    pub role: Role,
}

// ── Tests ──────────────────────────────────────────────────────
