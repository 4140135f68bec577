use crate::models::user::Role;
use crate::utils::time::iso_now;
use serde::{Deserialize, Serialize};

/// Kind of security-relevant action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    LoginAttempt,
    LoginSuccess,
    SessionExpired,
    Logout,
}

/// Immutable audit record. `success` is only present on login attempts and
/// `role` only on successful logins; `username` is absent when a logout hits
/// an already-anonymous session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub event: AuditKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub ip: String,
}

impl AuditEvent {
    fn base(event: AuditKind, username: Option<String>, ip: &str) -> Self {
        Self {
            timestamp: iso_now(),
            event,
            username,
            success: None,
            role: None,
            ip: ip.to_string(),
        }
    }

    pub fn login_attempt(username: &str, success: bool, ip: &str) -> Self {
        let mut event = Self::base(AuditKind::LoginAttempt, Some(username.to_string()), ip);
        event.success = Some(success);
        event
    }

    pub fn login_success(username: &str, role: Role, ip: &str) -> Self {
        let mut event = Self::base(AuditKind::LoginSuccess, Some(username.to_string()), ip);
        event.role = Some(role);
        event
    }

    pub fn session_expired(username: &str, ip: &str) -> Self {
        Self::base(AuditKind::SessionExpired, Some(username.to_string()), ip)
    }

    pub fn logout(username: Option<String>, ip: &str) -> Self {
        Self::base(AuditKind::Logout, username, ip)
    }
}
