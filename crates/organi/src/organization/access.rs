use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Header carrying the caller's role, set by the upstream authentication layer.
pub const ROLE_HEADER: &str = "x-organi-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRole {
    Admin,
    Editor,
    Viewer,
}

impl AccessRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Read,
    Write,
    Delete,
}

/// Role plus the permissions it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub role: AccessRole,
    pub permissions: Vec<Permission>,
}

impl AccessGrant {
    pub fn for_role(role: AccessRole) -> Self {
        let permissions = match role {
            AccessRole::Admin => vec![Permission::Read, Permission::Write, Permission::Delete],
            AccessRole::Editor => vec![Permission::Read, Permission::Write],
            AccessRole::Viewer => vec![Permission::Read],
        };
        Self { role, permissions }
    }

    /// Grant for a request; a missing or unrecognised role header falls back to viewer.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let role = headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(AccessRole::parse)
            .unwrap_or(AccessRole::Viewer);
        Self::for_role(role)
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn can_write(&self) -> bool {
        self.allows(Permission::Write)
    }
}
