use chrono::Utc;
use record_store::RecordStore;
use uuid::Uuid;

use super::domain::{NewUser, User, UserPatch};
use super::error::DbError;

pub const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserTable {
    store: RecordStore,
}

impl UserTable {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let users: Vec<User> = self.store.read_collection(COLLECTION).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Username lookup is case-insensitive everywhere.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let users: Vec<User> = self.store.read_collection(COLLECTION).await?;
        Ok(users
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username)))
    }

    /// Appends a new user with a fresh id and timestamp.
    ///
    /// The case-insensitive uniqueness check and the append happen inside
    /// one read-modify-write pass of the single-writer store, so a second
    /// create cannot land between check and write.
    pub async fn create(&self, draft: NewUser) -> Result<User, DbError> {
        let mut users: Vec<User> = self.store.read_collection(COLLECTION).await?;

        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&draft.username))
        {
            return Err(DbError::DuplicateUsername(draft.username));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: draft.email,
            username: draft.username,
            password_hash: draft.password_hash,
            avatar_url: draft.avatar_url,
            bio: draft.bio,
            message_privacy: draft.message_privacy,
            created_at: Utc::now().to_rfc3339(),
        };

        users.push(user.clone());
        self.store.write_collection(COLLECTION, &users).await?;
        Ok(user)
    }

    /// Shallow-merges the patch over the stored record and writes the full
    /// record back. Denormalized copies of the username elsewhere are left
    /// as written.
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<User, DbError> {
        let mut users: Vec<User> = self.store.read_collection(COLLECTION).await?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Err(DbError::NotFound(format!("user {id}")));
        };

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = Some(password_hash);
        }
        if let Some(avatar_url) = patch.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(message_privacy) = patch.message_privacy {
            user.message_privacy = message_privacy;
        }

        let updated = user.clone();
        self.store.write_collection(COLLECTION, &users).await?;
        Ok(updated)
    }
}
