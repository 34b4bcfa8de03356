use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessagePrivacy {
    All,
    Friends,
}

impl MessagePrivacy {
    pub fn as_str(self) -> &'static str {
        match self {
            MessagePrivacy::All => "all",
            MessagePrivacy::Friends => "friends",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// Display fields (usernames) on posts, messages and requests are copied
/// from the user record at write time. A later rename leaves them stale;
/// reads never join back to the users collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub message_privacy: MessagePrivacy,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub message_privacy: MessagePrivacy,
}

/// Fields to merge over an existing user record. `None` leaves the stored
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub message_privacy: Option<MessagePrivacy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub tags: Vec<String>,
    pub poll: Option<Poll>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    /// `None` derives tags from `#word` tokens in the content.
    pub tags: Option<Vec<String>>,
    pub poll: Option<Poll>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollOption {
    pub id: String,
    pub option_text: String,
    pub vote_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    /// `None` means a direct/unscoped message rather than a room message.
    pub room_id: Option<String>,
    pub sender_id: String,
    pub sender_username: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub room_id: Option<String>,
    pub sender_id: String,
    pub sender_username: String,
    pub content: String,
}

/// Unordered pair; membership is symmetric and there is no id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friendship {
    pub user_a: String,
    pub user_b: String,
}

impl Friendship {
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other side of the pair, or `None` when `user_id` is not part of
    /// this friendship.
    pub fn other(&self, user_id: &str) -> Option<&str> {
        if self.user_a == user_id {
            Some(&self.user_b)
        } else if self.user_b == user_id {
            Some(&self.user_a)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRequest {
    pub id: String,
    pub sender_id: String,
    pub sender_username: String,
    pub recipient_id: String,
    pub status: RequestStatus,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewFriendRequest {
    pub sender_id: String,
    pub sender_username: String,
    pub recipient_id: String,
}
