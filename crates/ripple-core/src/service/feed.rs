//! Post store: ownership-gated CRUD on feed content, with event fan-out
//! and best-effort image cleanup.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{FeedEvent, Post, RequestIdentity, User, validate_post_input};
use crate::error::{DomainError, RepoError};
use crate::ports::{FeedPublisher, ImageCleanup, PostRepository, UserRepository};
use crate::service::pagination::{FeedPage, PageRequest};

/// Patch semantics for a post's image on update, distinguishing "field
/// omitted" (keep the stored image) from "field set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImagePatch {
    #[default]
    Unchanged,
    Set(String),
}

#[derive(Debug, Clone)]
pub struct NewPostInput {
    pub title: String,
    pub content: String,
    /// The resolver surface may create a post before its image is
    /// assigned; the REST adapter rejects a missing image up front.
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostInput {
    pub title: String,
    pub content: String,
    pub image: ImagePatch,
}

/// A created post together with its creator, which the REST surface echoes
/// back in the response.
#[derive(Debug, Clone)]
pub struct CreatedPost {
    pub post: Post,
    pub creator: User,
}

/// Post store service. Owns the ownership invariant and the cascading
/// owned-post list updates on the creator.
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn FeedPublisher>,
    images: Arc<dyn ImageCleanup>,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        publisher: Arc<dyn FeedPublisher>,
        images: Arc<dyn ImageCleanup>,
    ) -> Self {
        Self {
            posts,
            users,
            publisher,
            images,
        }
    }

    /// One feed page, newest first, plus the total post count.
    ///
    /// Count and page fetch are two independent reads; a mutation landing
    /// between them is an accepted staleness window.
    pub async fn list(&self, page: PageRequest) -> Result<FeedPage, DomainError> {
        let total_count = self.posts.count_all().await?;
        let posts = self.posts.find_page(page.offset(), page.limit()).await?;
        Ok(FeedPage { posts, total_count })
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "post",
                id: post_id,
            })
    }

    /// Create a post owned by the authenticated user.
    pub async fn create(
        &self,
        identity: &RequestIdentity,
        input: NewPostInput,
    ) -> Result<CreatedPost, DomainError> {
        let creator_id = identity.require()?;

        let errors = validate_post_input(&input.title, &input.content);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        // The token may outlive the account it was issued for.
        let Some(mut creator) = self.users.find_by_id(creator_id).await? else {
            return Err(DomainError::Unauthenticated);
        };

        let post = Post::new(
            creator_id,
            input.title.trim().to_string(),
            input.content.trim().to_string(),
            input.image_url,
        );
        let post = self.posts.save(post).await?;

        // The post is already persisted; a failure updating the owned-post
        // list leaves an accepted inconsistency window rather than
        // reporting a failure for a committed mutation.
        creator.attach_post(post.id);
        creator.updated_at = Utc::now();
        let creator = match self.users.save(creator.clone()).await {
            Ok(saved) => saved,
            Err(err) => {
                tracing::error!(
                    post_id = %post.id,
                    user_id = %creator_id,
                    error = %err,
                    "failed to record post on creator's owned list"
                );
                creator
            }
        };

        self.publisher.publish(FeedEvent::Create(post.clone()));
        Ok(CreatedPost { post, creator })
    }

    /// Update a post. Only its creator may do so.
    ///
    /// Check order: structural validation is computed first (pure, no
    /// I/O), but its error list is raised only after the not-found and
    /// ownership checks.
    pub async fn update(
        &self,
        identity: &RequestIdentity,
        post_id: Uuid,
        input: UpdatePostInput,
    ) -> Result<Post, DomainError> {
        let errors = validate_post_input(&input.title, &input.content);
        let actor_id = identity.require()?;

        let mut post = self.get(post_id).await?;
        if post.creator_id != actor_id {
            return Err(DomainError::Forbidden);
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let old_image = post.image_url.clone();
        post.title = input.title.trim().to_string();
        post.content = input.content.trim().to_string();
        if let ImagePatch::Set(image_url) = input.image {
            post.image_url = Some(image_url);
        }
        post.updated_at = Utc::now();

        let post = self.posts.save(post).await?;

        // The replaced image file is now orphaned.
        if let Some(old) = old_image {
            if post.image_url.as_deref() != Some(old.as_str()) {
                self.images.schedule_delete(&old);
            }
        }

        self.publisher.publish(FeedEvent::Update(post.clone()));
        Ok(post)
    }

    /// Delete a post. Only its creator may do so.
    ///
    /// The delete is successful once the post record is gone; image
    /// cleanup and owned-list pruning failures are logged, never surfaced.
    pub async fn delete(
        &self,
        identity: &RequestIdentity,
        post_id: Uuid,
    ) -> Result<(), DomainError> {
        let actor_id = identity.require()?;

        let post = self.get(post_id).await?;
        if post.creator_id != actor_id {
            return Err(DomainError::Forbidden);
        }

        self.posts.delete(post_id).await.map_err(|err| match err {
            // Lost a race with a concurrent delete.
            RepoError::NotFound => DomainError::NotFound {
                entity: "post",
                id: post_id,
            },
            other => other.into(),
        })?;

        if let Some(image_url) = &post.image_url {
            self.images.schedule_delete(image_url);
        }

        match self.users.find_by_id(actor_id).await {
            Ok(Some(mut owner)) => {
                owner.detach_post(post_id);
                owner.updated_at = Utc::now();
                if let Err(err) = self.users.save(owner).await {
                    tracing::error!(
                        post_id = %post_id,
                        user_id = %actor_id,
                        error = %err,
                        "failed to prune deleted post from owned list"
                    );
                }
            }
            Ok(None) => {
                tracing::warn!(post_id = %post_id, user_id = %actor_id, "post owner no longer exists");
            }
            Err(err) => {
                tracing::error!(
                    post_id = %post_id,
                    user_id = %actor_id,
                    error = %err,
                    "failed to load post owner for owned-list pruning"
                );
            }
        }

        self.publisher.publish(FeedEvent::Delete(post_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::POSTS_PER_PAGE;
    use crate::service::test_support::{
        RecordingCleanup, RecordingPublisher, TestPosts, TestUsers,
    };

    struct Fixture {
        feed: FeedService,
        users: Arc<TestUsers>,
        publisher: Arc<RecordingPublisher>,
        cleanup: Arc<RecordingCleanup>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(TestUsers::default());
        let posts = Arc::new(TestPosts::default());
        let publisher = Arc::new(RecordingPublisher::default());
        let cleanup = Arc::new(RecordingCleanup::default());
        let feed = FeedService::new(
            posts,
            users.clone(),
            publisher.clone(),
            cleanup.clone(),
        );
        Fixture {
            feed,
            users,
            publisher,
            cleanup,
        }
    }

    async fn seed_user(fx: &Fixture, email: &str) -> User {
        let user = User::new(email.into(), "Test".into(), "hash".into());
        fx.users.insert(user.clone()).await;
        user
    }

    fn new_post_input(image: Option<&str>) -> NewPostInput {
        NewPostInput {
            title: "Hello world".into(),
            content: "Some content".into(),
            image_url: image.map(Into::into),
        }
    }

    #[tokio::test]
    async fn create_requires_authentication() {
        let fx = fixture();

        let err = fx
            .feed
            .create(&RequestIdentity::anonymous(), new_post_input(None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
        assert!(fx.publisher.events().is_empty());
    }

    #[tokio::test]
    async fn create_persists_and_attaches_to_owner() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let created = fx
            .feed
            .create(&identity, new_post_input(Some("images/a.png")))
            .await
            .unwrap();

        assert_eq!(created.post.creator_id, user.id);
        assert_eq!(created.creator.post_ids, vec![created.post.id]);

        let stored_owner = fx.users.get(user.id).await.unwrap();
        assert_eq!(stored_owner.post_ids, vec![created.post.id]);

        let events = fx.publisher.events();
        assert!(matches!(&events[..], [FeedEvent::Create(p)] if p.id == created.post.id));
    }

    #[tokio::test]
    async fn create_succeeds_even_if_owned_list_update_fails() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        fx.users.fail_next_save();

        let created = fx
            .feed
            .create(
                &RequestIdentity::authenticated(user.id),
                new_post_input(None),
            )
            .await
            .unwrap();

        // Post exists, event published, owner's list is stale.
        assert_eq!(fx.publisher.events().len(), 1);
        assert!(fx.users.get(user.id).await.unwrap().post_ids.is_empty());
        assert!(fx.feed.get(created.post.id).await.is_ok());
    }

    #[tokio::test]
    async fn create_validates_title_and_content() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;

        let err = fx
            .feed
            .create(
                &RequestIdentity::authenticated(user.id),
                NewPostInput {
                    title: "Hi".into(),
                    content: "ok".into(),
                    image_url: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            DomainError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "content"]);
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_by_non_creator_is_forbidden() {
        let fx = fixture();
        let owner = seed_user(&fx, "u1@x.com").await;
        let intruder = seed_user(&fx, "u2@x.com").await;

        let created = fx
            .feed
            .create(
                &RequestIdentity::authenticated(owner.id),
                new_post_input(None),
            )
            .await
            .unwrap();

        // Forbidden even though the rest of the input is invalid too:
        // ownership is checked before the validation list is raised.
        let err = fx
            .feed
            .update(
                &RequestIdentity::authenticated(intruder.id),
                created.post.id,
                UpdatePostInput {
                    title: "x".into(),
                    content: "y".into(),
                    image: ImagePatch::Unchanged,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;

        let err = fx
            .feed
            .update(
                &RequestIdentity::authenticated(user.id),
                Uuid::new_v4(),
                UpdatePostInput {
                    title: "Hello world".into(),
                    content: "Some content".into(),
                    image: ImagePatch::Unchanged,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "post", .. }));
    }

    #[tokio::test]
    async fn update_replacing_image_schedules_cleanup_of_old_file() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let created = fx
            .feed
            .create(&identity, new_post_input(Some("images/old.png")))
            .await
            .unwrap();

        let updated = fx
            .feed
            .update(
                &identity,
                created.post.id,
                UpdatePostInput {
                    title: "Hello again".into(),
                    content: "Fresh content".into(),
                    image: ImagePatch::Set("images/new.png".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.image_url.as_deref(), Some("images/new.png"));
        assert_eq!(fx.cleanup.paths(), vec!["images/old.png"]);
        assert!(matches!(
            fx.publisher.events().last(),
            Some(FeedEvent::Update(_))
        ));
    }

    #[tokio::test]
    async fn update_with_omitted_image_keeps_stored_one() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let created = fx
            .feed
            .create(&identity, new_post_input(Some("images/keep.png")))
            .await
            .unwrap();

        let updated = fx
            .feed
            .update(
                &identity,
                created.post.id,
                UpdatePostInput {
                    title: "Hello again".into(),
                    content: "Fresh content".into(),
                    image: ImagePatch::Unchanged,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.image_url.as_deref(), Some("images/keep.png"));
        assert!(fx.cleanup.paths().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_post_prunes_owner_and_cleans_image() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let created = fx
            .feed
            .create(&identity, new_post_input(Some("images/gone.png")))
            .await
            .unwrap();

        fx.feed.delete(&identity, created.post.id).await.unwrap();

        assert!(matches!(
            fx.feed.get(created.post.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(fx.users.get(user.id).await.unwrap().post_ids.is_empty());
        assert_eq!(fx.cleanup.paths(), vec!["images/gone.png"]);
        assert!(matches!(
            fx.publisher.events().last(),
            Some(FeedEvent::Delete(id)) if *id == created.post.id
        ));
    }

    #[tokio::test]
    async fn delete_succeeds_even_if_owner_pruning_fails() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let created = fx
            .feed
            .create(&identity, new_post_input(Some("images/gone.png")))
            .await
            .unwrap();

        fx.users.fail_next_save();
        fx.feed.delete(&identity, created.post.id).await.unwrap();

        // Record is gone, owned list is stale.
        assert!(fx.feed.get(created.post.id).await.is_err());
        assert_eq!(
            fx.users.get(user.id).await.unwrap().post_ids,
            vec![created.post.id]
        );
    }

    #[tokio::test]
    async fn delete_by_non_creator_is_forbidden() {
        let fx = fixture();
        let owner = seed_user(&fx, "u1@x.com").await;
        let intruder = seed_user(&fx, "u2@x.com").await;
        let owner_identity = RequestIdentity::authenticated(owner.id);

        let created = fx
            .feed
            .create(&owner_identity, new_post_input(None))
            .await
            .unwrap();

        let err = fx
            .feed
            .delete(&RequestIdentity::authenticated(intruder.id), created.post.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
        assert!(fx.feed.get(created.post.id).await.is_ok());
    }

    #[tokio::test]
    async fn list_pages_newest_first_with_total_count() {
        let fx = fixture();
        let user = seed_user(&fx, "u1@x.com").await;
        let identity = RequestIdentity::authenticated(user.id);

        let mut ids = Vec::new();
        for i in 0..5 {
            let created = fx
                .feed
                .create(
                    &identity,
                    NewPostInput {
                        title: format!("Post number {i}"),
                        content: "Some content".into(),
                        image_url: None,
                    },
                )
                .await
                .unwrap();
            ids.push(created.post.id);
            // Distinct creation instants so the ordering is deterministic.
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let first = fx.feed.list(PageRequest::new(Some(1))).await.unwrap();
        assert_eq!(first.total_count, 5);
        assert_eq!(first.posts.len(), POSTS_PER_PAGE as usize);
        assert_eq!(first.posts[0].id, ids[4]);
        assert_eq!(first.posts[1].id, ids[3]);

        let last = fx.feed.list(PageRequest::new(Some(3))).await.unwrap();
        assert_eq!(last.posts.len(), 1);
        assert_eq!(last.posts[0].id, ids[0]);

        let beyond = fx.feed.list(PageRequest::new(Some(4))).await.unwrap();
        assert!(beyond.posts.is_empty());
        assert_eq!(beyond.total_count, 5);
    }

    #[tokio::test]
    async fn list_is_open_to_anonymous_callers() {
        let fx = fixture();
        // No identity is involved in reads at all.
        let page = fx.feed.list(PageRequest::new(None)).await.unwrap();
        assert_eq!(page.total_count, 0);
    }
}
