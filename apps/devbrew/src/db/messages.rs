use chrono::Utc;
use record_store::RecordStore;
use uuid::Uuid;

use super::domain::{Message, NewMessage};
use super::error::DbError;

pub const COLLECTION: &str = "messages";

#[derive(Clone)]
pub struct MessageTable {
    store: RecordStore,
}

impl MessageTable {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Messages for one room, oldest first. Conversations read
    /// chronologically, the opposite direction from the feed.
    pub async fn list_for_room(&self, room_id: &str) -> Result<Vec<Message>, DbError> {
        let mut messages: Vec<Message> = self.store.read_collection(COLLECTION).await?;
        messages.retain(|m| m.room_id.as_deref() == Some(room_id));
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    /// Appends a message with a fresh id and timestamp.
    pub async fn send(&self, draft: NewMessage) -> Result<Message, DbError> {
        let mut messages: Vec<Message> = self.store.read_collection(COLLECTION).await?;

        let message = Message {
            id: Uuid::new_v4().to_string(),
            room_id: draft.room_id,
            sender_id: draft.sender_id,
            sender_username: draft.sender_username,
            content: draft.content,
            created_at: Utc::now().to_rfc3339(),
        };

        messages.push(message.clone());
        self.store.write_collection(COLLECTION, &messages).await?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use record_store::MemoryBackend;

    use super::*;

    fn store() -> RecordStore {
        RecordStore::new(Arc::new(MemoryBackend::new()), "devbrew")
    }

    fn stored(room_id: Option<&str>, content: &str, created_at: &str) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.map(str::to_string),
            sender_id: "u1".to_string(),
            sender_username: "alice".to_string(),
            content: content.to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn sent_message_round_trips() {
        let store = store();
        let messages = MessageTable::new(store.clone());

        let sent = messages
            .send(NewMessage {
                room_id: Some("room-1".to_string()),
                sender_id: "u1".to_string(),
                sender_username: "alice".to_string(),
                content: "hello".to_string(),
            })
            .await
            .expect("send");

        let raw: Vec<Message> = store.read_collection(COLLECTION).await.expect("read");
        assert_eq!(raw, vec![sent]);
    }

    #[tokio::test]
    async fn room_listing_filters_and_sorts_oldest_first() {
        let store = store();
        let messages = MessageTable::new(store.clone());

        let blob = vec![
            stored(Some("room-1"), "second", "2026-08-02T08:00:00+00:00"),
            stored(Some("room-2"), "elsewhere", "2026-08-01T09:00:00+00:00"),
            stored(Some("room-1"), "first", "2026-08-01T08:00:00+00:00"),
            stored(None, "direct", "2026-08-01T10:00:00+00:00"),
        ];
        store
            .write_collection(COLLECTION, &blob)
            .await
            .expect("seed messages");

        let listed = messages.list_for_room("room-1").await.expect("list");
        let contents: Vec<&str> = listed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        for message in &listed {
            assert_eq!(message.room_id.as_deref(), Some("room-1"));
        }
        for pair in listed.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn unscoped_messages_never_appear_in_rooms() {
        let store = store();
        let messages = MessageTable::new(store.clone());

        messages
            .send(NewMessage {
                room_id: None,
                sender_id: "u1".to_string(),
                sender_username: "alice".to_string(),
                content: "direct".to_string(),
            })
            .await
            .expect("send");

        let listed = messages.list_for_room("room-1").await.expect("list");
        assert!(listed.is_empty());
    }
}
