use serde::Serialize;
use uuid::Uuid;

use crate::domain::Post;

/// Mutation notification fanned out to connected feed subscribers after the
/// causing mutation has committed.
///
/// Serializes as `{"action": "create"|"update"|"delete", "post": ...}`,
/// where deletes carry only the post id.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", content = "post", rename_all = "lowercase")]
pub enum FeedEvent {
    Create(Post),
    Update(Post),
    Delete(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_event_wire_shape() {
        let post = Post::new(
            Uuid::new_v4(),
            "Hello world".into(),
            "Some content".into(),
            Some("images/a.png".into()),
        );
        let value = serde_json::to_value(FeedEvent::Create(post.clone())).unwrap();

        assert_eq!(value["action"], "create");
        assert_eq!(value["post"]["title"], "Hello world");
        assert_eq!(value["post"]["imageUrl"], "images/a.png");
    }

    #[test]
    fn delete_event_carries_only_the_id() {
        let id = Uuid::new_v4();
        let value = serde_json::to_value(FeedEvent::Delete(id)).unwrap();

        assert_eq!(value["action"], "delete");
        assert_eq!(value["post"], id.to_string());
    }
}
