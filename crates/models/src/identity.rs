use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// The authenticated principal attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// The fixed administrator identity handed out by the mock login.
    pub fn mock_admin(email: impl Into<String>) -> Self {
        Self { id: 1, name: "Admin User".into(), email: email.into(), role: Role::Admin }
    }
}
