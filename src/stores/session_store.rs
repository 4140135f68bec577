use crate::models::session::Session;
use crate::models::user::Role;
use dashmap::DashMap;
use rand::RngCore;

/// Token-keyed session map. Tokens are 32 random bytes, hex-encoded, so the
/// client-held cookie value is opaque.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a session for a freshly authenticated user and return its token.
    pub fn create(&self, user: String, role: Role, now: i64) -> String {
        let token = generate_token();
        self.sessions
            .insert(token.clone(), Session::new(user, role, now));
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// Destroy a session, returning it so callers can audit the user it held.
    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, session)| session)
    }

    /// Refresh the activity timestamp in place (sliding expiration).
    pub fn touch(&self, token: &str, now: i64) {
        if let Some(mut entry) = self.sessions.get_mut(token) {
            entry.touch(now);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
