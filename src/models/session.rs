use crate::models::user::Role;
use crate::utils::time::is_expired;

/// Server-side session record, referenced by the client's cookie token.
///
/// A client whose token resolves to no session is anonymous.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub role: Role,
    /// Epoch seconds of the most recent authenticated activity.
    pub last_activity: i64,
}

impl Session {
    pub fn new(user: String, role: Role, now: i64) -> Self {
        Self {
            user,
            role,
            last_activity: now,
        }
    }

    /// Sliding expiration: the window is measured from the most recent
    /// activity, not from session creation.
    pub fn is_expired(&self, ttl_secs: i64, now: i64) -> bool {
        is_expired(self.last_activity, ttl_secs, now)
    }

    pub fn touch(&mut self, now: i64) {
        self.last_activity = now;
    }
}
