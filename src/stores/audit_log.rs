use crate::models::audit::AuditEvent;
use std::sync::RwLock;

/// Process-lifetime, append-only audit log. Unbounded; a restart loses it.
pub struct AuditLog {
    events: RwLock<Vec<AuditEvent>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn record(&self, event: AuditEvent) {
        self.events
            .write()
            .expect("audit log lock poisoned")
            .push(event);
    }

    /// Full copy of the log for serving over the API.
    pub fn snapshot(&self) -> Vec<AuditEvent> {
        self.events
            .read()
            .expect("audit log lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().expect("audit log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
