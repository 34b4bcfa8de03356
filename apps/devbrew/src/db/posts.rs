use chrono::Utc;
use record_store::RecordStore;
use uuid::Uuid;

use super::domain::{NewPost, Post};
use super::error::DbError;

pub const COLLECTION: &str = "posts";

#[derive(Clone)]
pub struct PostTable {
    store: RecordStore,
}

impl PostTable {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Full feed, newest first. The sort is stable, so posts sharing a
    /// timestamp keep their insertion order.
    pub async fn list(&self) -> Result<Vec<Post>, DbError> {
        let mut posts: Vec<Post> = self.store.read_collection(COLLECTION).await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Appends a post with a fresh id and timestamp. When the draft
    /// carries no tags they are derived from `#word` tokens in the
    /// content.
    pub async fn create(&self, draft: NewPost) -> Result<Post, DbError> {
        let mut posts: Vec<Post> = self.store.read_collection(COLLECTION).await?;

        let tags = draft
            .tags
            .unwrap_or_else(|| extract_hashtags(&draft.content));

        let post = Post {
            id: Uuid::new_v4().to_string(),
            author_id: draft.author_id,
            author_username: draft.author_username,
            content: draft.content,
            tags,
            poll: draft.poll,
            created_at: Utc::now().to_rfc3339(),
        };

        posts.push(post.clone());
        self.store.write_collection(COLLECTION, &posts).await?;
        Ok(post)
    }
}

/// `#word` tokens in order of appearance, leading `#` stripped. Repeated
/// tags are kept as written; the feed renders them verbatim.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let bytes = content.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'#' {
            i += 1;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < bytes.len() {
            let c = bytes[end] as char;
            if c.is_ascii_alphanumeric() || c == '_' {
                end += 1;
            } else {
                break;
            }
        }

        if end > start {
            out.push(content[start..end].to_string());
        }

        i = end.max(i + 1);
    }

    out
}
