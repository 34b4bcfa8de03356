use std::sync::Arc;

use record_store::{KvBackend, StoreError};

use crate::db::domain::User;

/// Single-value cell holding the signed-in user as one JSON blob under a
/// fixed key. Deliberately outside the record store's collections: read
/// once at startup, written on login or signup, removed on logout.
#[derive(Clone)]
pub struct SessionCell {
    backend: Arc<dyn KvBackend>,
    key: String,
}

impl SessionCell {
    pub fn new(backend: Arc<dyn KvBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The saved session, or `None` when signed out. A blob that no
    /// longer parses reads as signed out rather than an error.
    pub async fn load(&self) -> Result<Option<User>, StoreError> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                tracing::warn!(
                    component = "session",
                    error = %err,
                    "malformed session blob, treating as signed out"
                );
                Ok(None)
            }
        }
    }

    pub async fn save(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.backend.set(&self.key, &raw)?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use record_store::MemoryBackend;

    use super::*;
    use crate::db::domain::MessagePrivacy;

    fn cell() -> (Arc<MemoryBackend>, SessionCell) {
        let backend = Arc::new(MemoryBackend::new());
        let cell = SessionCell::new(backend.clone(), "devbrew_session");
        (backend, cell)
    }

    fn demo_user() -> User {
        User {
            id: "u1".to_string(),
            email: "alice@devbrew.io".to_string(),
            username: "alice".to_string(),
            password_hash: None,
            avatar_url: None,
            bio: None,
            message_privacy: MessagePrivacy::All,
            created_at: "2026-08-01T08:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn save_load_clear_round_trip() {
        let (_, cell) = cell();

        assert!(cell.load().await.expect("load empty").is_none());

        let user = demo_user();
        cell.save(&user).await.expect("save");
        assert_eq!(cell.load().await.expect("load").as_ref(), Some(&user));

        cell.clear().await.expect("clear");
        assert!(cell.load().await.expect("load cleared").is_none());
    }

    #[tokio::test]
    async fn malformed_session_reads_as_signed_out() {
        let (backend, cell) = cell();
        backend
            .set("devbrew_session", "{broken")
            .expect("plant corrupt blob");

        assert!(cell.load().await.expect("load").is_none());
    }
}
