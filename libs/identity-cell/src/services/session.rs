// libs/identity-cell/src/services/session.rs
use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use shared_models::AuthSession;

/// In-process registry of authenticated sessions. Replaces the ambient
/// auth/role/user flags the legacy client persisted in local storage:
/// a session is created once at login, looked up by token, and removed on
/// logout.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, AuthSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: AuthSession) -> Uuid {
        let token = session.token;
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .insert(token, session);
        debug!("Session {} opened", token);
        token
    }

    pub fn get(&self, token: &Uuid) -> Option<AuthSession> {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }

    /// Teardown on logout. Returns whether a session was actually cleared.
    pub fn clear(&self, token: &Uuid) -> bool {
        let removed = self
            .sessions
            .lock()
            .expect("session store lock poisoned")
            .remove(token)
            .is_some();
        if removed {
            debug!("Session {} cleared", token);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::{PatientIdentity, Role};

    fn identity() -> PatientIdentity {
        PatientIdentity {
            name: "Ali Veli".to_string(),
            tc: "12345678901".to_string(),
            age: "30".to_string(),
        }
    }

    #[test]
    fn login_then_logout_clears_session() {
        let store = SessionStore::new();
        let token = store.insert(AuthSession::authenticated(Role::Patient, identity()));

        assert!(store.get(&token).is_some());
        assert!(store.clear(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.clear(&token));
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
    }
}
