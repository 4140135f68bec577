use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to every user record.
///
/// Assignment is by literal username match only: "admin" and "guest" get
/// their namesake roles, every other username is a plain user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Guest,
    User,
}

impl Role {
    pub fn for_username(username: &str) -> Self {
        match username {
            "admin" => Role::Admin,
            "guest" => Role::Guest,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry shape of the user data file: username and plaintext password.
/// Roles are not stored on disk, they are derived at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFileEntry {
    pub username: String,
    pub password: String,
}

/// In-memory user record with the derived role.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl From<UserFileEntry> for UserRecord {
    fn from(entry: UserFileEntry) -> Self {
        let role = Role::for_username(&entry.username);
        Self {
            username: entry.username,
            password: entry.password,
            role,
        }
    }
}
