use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to accounts that never set one.
pub const DEFAULT_STATUS: &str = "I am new!";

/// User entity - an account that owns posts.
///
/// The `post_ids` collection is the owning side of the user/post relation;
/// posts keep a `creator_id` back-reference for authorization checks only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub status: String,
    /// Posts created by this user, oldest first.
    pub post_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, timestamps, and default status.
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            status: DEFAULT_STATUS.to_string(),
            post_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a post reference. Adding a reference that is already present is
    /// a no-op.
    pub fn attach_post(&mut self, post_id: Uuid) {
        if !self.post_ids.contains(&post_id) {
            self.post_ids.push(post_id);
        }
    }

    /// Remove a post reference. Removing an absent reference is a no-op.
    pub fn detach_post(&mut self, post_id: Uuid) {
        self.post_ids.retain(|id| *id != post_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_post_skips_duplicates() {
        let mut user = User::new("a@x.com".into(), "A".into(), "hash".into());
        let post_id = Uuid::new_v4();

        user.attach_post(post_id);
        user.attach_post(post_id);

        assert_eq!(user.post_ids, vec![post_id]);
    }

    #[test]
    fn detach_absent_post_is_noop() {
        let mut user = User::new("a@x.com".into(), "A".into(), "hash".into());
        let kept = Uuid::new_v4();
        user.attach_post(kept);

        user.detach_post(Uuid::new_v4());

        assert_eq!(user.post_ids, vec![kept]);
    }
}
