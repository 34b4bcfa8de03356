pub mod domain;
pub mod error;
pub mod friends;
pub mod messages;
pub mod posts;
pub mod users;

use record_store::RecordStore;

use self::domain::{MessagePrivacy, NewPost, NewUser, User};
use self::error::DbError;
use self::friends::FriendTable;
use self::messages::MessageTable;
use self::posts::PostTable;
use self::users::UserTable;

pub const SEED_USERNAME: &str = "coffee_coder";
pub const SEED_PASSWORD: &str = "password123";

/// All table services over one explicitly constructed record store. No
/// ambient global; tests build one per case over an in-memory backend.
#[derive(Clone)]
pub struct Database {
    store: RecordStore,
    pub users: UserTable,
    pub posts: PostTable,
    pub messages: MessageTable,
    pub friends: FriendTable,
}

impl Database {
    pub fn new(store: RecordStore) -> Self {
        let users = UserTable::new(store.clone());
        Self {
            posts: PostTable::new(store.clone()),
            messages: MessageTable::new(store.clone()),
            friends: FriendTable::new(store.clone(), users.clone()),
            users,
            store,
        }
    }

    /// Seeds the demo account and its first post when the users collection
    /// is empty. Safe to call on every startup; the emptiness check is
    /// what makes it idempotent.
    pub async fn bootstrap(&self) -> Result<(), DbError> {
        let existing: Vec<User> = self.store.read_collection(users::COLLECTION).await?;
        if !existing.is_empty() {
            return Ok(());
        }

        let password_hash = crate::auth::hash_password(SEED_PASSWORD)
            .map_err(|err| DbError::Bootstrap(err.to_string()))?;

        let seed = self
            .users
            .create(NewUser {
                email: "coffee_coder@devbrew.io".to_string(),
                username: SEED_USERNAME.to_string(),
                password_hash: Some(password_hash),
                avatar_url: None,
                bio: Some("I turn caffeine into recursive functions.".to_string()),
                message_privacy: MessagePrivacy::All,
            })
            .await?;

        self.posts
            .create(NewPost {
                author_id: seed.id.clone(),
                author_username: seed.username.clone(),
                content: "Just initialized the DevBrew kernel. Ready to code. #helloworld #coffee"
                    .to_string(),
                tags: Some(vec!["helloworld".to_string(), "coffee".to_string()]),
                poll: None,
            })
            .await?;

        tracing::info!(component = "db", user = SEED_USERNAME, "seeded demo data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use record_store::MemoryBackend;

    use super::*;

    fn database() -> Database {
        let store = RecordStore::new(Arc::new(MemoryBackend::new()), "devbrew");
        Database::new(store)
    }

    #[tokio::test]
    async fn bootstrap_seeds_demo_user_and_post_once() {
        let db = database();

        db.bootstrap().await.expect("first bootstrap");
        db.bootstrap().await.expect("second bootstrap");

        let users: Vec<User> = db
            .store
            .read_collection(users::COLLECTION)
            .await
            .expect("read users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, SEED_USERNAME);
        assert!(users[0].password_hash.is_some());

        let feed = db.posts.list().await.expect("list posts");
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author_username, SEED_USERNAME);
        assert_eq!(feed[0].tags, vec!["helloworld", "coffee"]);
    }

    #[tokio::test]
    async fn bootstrap_leaves_existing_data_alone() {
        let db = database();

        db.users
            .create(domain::NewUser {
                email: "alice@devbrew.io".to_string(),
                username: "alice".to_string(),
                password_hash: None,
                avatar_url: None,
                bio: None,
                message_privacy: MessagePrivacy::All,
            })
            .await
            .expect("create user");

        db.bootstrap().await.expect("bootstrap");

        let users: Vec<User> = db
            .store
            .read_collection(users::COLLECTION)
            .await
            .expect("read users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
    }
}
