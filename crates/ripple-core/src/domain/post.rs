use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a content item on the feed.
///
/// `creator_id` is immutable after creation; only that user may update or
/// delete the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub content: String,
    /// Relative path of the post's image under the images directory. The
    /// resolver surface may create a post before its image is assigned.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(creator_id: Uuid, title: String, content: String, image_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creator_id,
            title,
            content,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }
}
