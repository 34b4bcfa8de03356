use chrono::Utc;
use record_store::RecordStore;
use uuid::Uuid;

use super::domain::{FriendRequest, Friendship, NewFriendRequest, RequestStatus, User};
use super::error::DbError;
use super::users::UserTable;

pub const FRIENDSHIPS: &str = "friendships";
pub const REQUESTS: &str = "friend_requests";

#[derive(Clone)]
pub struct FriendTable {
    store: RecordStore,
    users: UserTable,
}

impl FriendTable {
    pub fn new(store: RecordStore, users: UserTable) -> Self {
        Self { store, users }
    }

    /// Full user records for everyone paired with `user_id` on either side
    /// of a friendship. Pair entries whose other id no longer resolves are
    /// dropped, best effort.
    pub async fn list_friends(&self, user_id: &str) -> Result<Vec<User>, DbError> {
        let friendships: Vec<Friendship> = self.store.read_collection(FRIENDSHIPS).await?;

        let mut friends = Vec::new();
        for pair in &friendships {
            let Some(other) = pair.other(user_id) else {
                continue;
            };
            match self.users.get_by_id(other).await? {
                Some(user) => friends.push(user),
                None => tracing::warn!(
                    component = "db.friends",
                    friend_id = %other,
                    "friendship references unknown user, skipping"
                ),
            }
        }

        Ok(friends)
    }

    /// Pending requests addressed to `user_id`, in stored order.
    pub async fn list_requests(&self, user_id: &str) -> Result<Vec<FriendRequest>, DbError> {
        let requests: Vec<FriendRequest> = self.store.read_collection(REQUESTS).await?;
        Ok(requests
            .into_iter()
            .filter(|r| r.recipient_id == user_id && r.status == RequestStatus::Pending)
            .collect())
    }

    /// Appends a pending request with a fresh id and timestamp.
    pub async fn send_request(&self, draft: NewFriendRequest) -> Result<FriendRequest, DbError> {
        let mut requests: Vec<FriendRequest> = self.store.read_collection(REQUESTS).await?;

        let request = FriendRequest {
            id: Uuid::new_v4().to_string(),
            sender_id: draft.sender_id,
            sender_username: draft.sender_username,
            recipient_id: draft.recipient_id,
            status: RequestStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
        };

        requests.push(request.clone());
        self.store.write_collection(REQUESTS, &requests).await?;
        Ok(request)
    }

    /// Flips a request to accepted or rejected. Accepting records the
    /// friendship pair unless one between the two users already exists.
    pub async fn respond(&self, request_id: &str, accept: bool) -> Result<FriendRequest, DbError> {
        let mut requests: Vec<FriendRequest> = self.store.read_collection(REQUESTS).await?;

        let Some(request) = requests.iter_mut().find(|r| r.id == request_id) else {
            return Err(DbError::NotFound(format!("friend request {request_id}")));
        };

        request.status = if accept {
            RequestStatus::Accepted
        } else {
            RequestStatus::Rejected
        };
        let updated = request.clone();
        self.store.write_collection(REQUESTS, &requests).await?;
        tracing::info!(
            component = "db.friends",
            request_id = %updated.id,
            status = updated.status.as_str(),
            "friend request resolved"
        );

        if accept {
            let mut friendships: Vec<Friendship> = self.store.read_collection(FRIENDSHIPS).await?;
            let already = friendships
                .iter()
                .any(|f| f.involves(&updated.sender_id) && f.involves(&updated.recipient_id));
            if !already {
                friendships.push(Friendship {
                    user_a: updated.sender_id.clone(),
                    user_b: updated.recipient_id.clone(),
                });
                self.store
                    .write_collection(FRIENDSHIPS, &friendships)
                    .await?;
            }
        }

        Ok(updated)
    }
}
