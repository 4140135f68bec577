use crate::models::user::{UserFileEntry, UserRecord};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory user list backed by a JSON file on disk.
///
/// Loaded once at startup and replaced wholesale on reset; individual
/// records are never mutated. Kept as a Vec so username listings preserve
/// file order.
pub struct UserStore {
    path: PathBuf,
    users: RwLock<Vec<UserRecord>>,
}

impl UserStore {
    /// Load the store from `path`. A missing or malformed file is an error;
    /// at startup the caller treats this as fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let users = read_user_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            users: RwLock::new(users),
        })
    }

    /// Re-read the backing file and replace the whole list. On failure the
    /// previous list stays in place.
    pub fn reload(&self) -> Result<Vec<String>> {
        let users = read_user_file(&self.path)?;
        let names = users.iter().map(|u| u.username.clone()).collect();
        *self.users.write().expect("user store lock poisoned") = users;
        Ok(names)
    }

    /// Exact-match credential check, linear and case-sensitive.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<UserRecord> {
        self.users
            .read()
            .expect("user store lock poisoned")
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    /// Usernames in file order.
    pub fn usernames(&self) -> Vec<String> {
        self.users
            .read()
            .expect("user store lock poisoned")
            .iter()
            .map(|u| u.username.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.read().expect("user store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_user_file(path: &Path) -> Result<Vec<UserRecord>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read user data file: {}", path.display()))?;

    let entries: Vec<UserFileEntry> = serde_json::from_str(&content)
        .context(format!("Failed to parse user data file: {}", path.display()))?;

    Ok(entries.into_iter().map(UserRecord::from).collect())
}
