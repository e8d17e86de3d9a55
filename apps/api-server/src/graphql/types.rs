//! GraphQL object and input types.

use std::sync::Arc;

use async_graphql::{Context, ID, InputObject, Object, Result, SimpleObject};

use ripple_core::domain::{Post, User};
use ripple_core::service::{AuthService, FeedService};

use super::gql_error;

/// A feed post.
pub struct GqlPost(pub Post);

impl From<Post> for GqlPost {
    fn from(post: Post) -> Self {
        Self(post)
    }
}

#[Object(name = "Post")]
impl GqlPost {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn image_url(&self) -> Option<&str> {
        self.0.image_url.as_deref()
    }

    /// The owning account.
    async fn creator(&self, ctx: &Context<'_>) -> Result<GqlUser> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        auth.find_user(self.0.creator_id)
            .await
            .map(GqlUser::from)
            .map_err(gql_error)
    }

    async fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }

    async fn updated_at(&self) -> String {
        self.0.updated_at.to_rfc3339()
    }
}

/// An account. The password hash never crosses this boundary.
pub struct GqlUser(pub User);

impl From<User> for GqlUser {
    fn from(user: User) -> Self {
        Self(user)
    }
}

#[Object(name = "User")]
impl GqlUser {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn status(&self) -> &str {
        &self.0.status
    }

    /// Posts owned by this account. References that no longer resolve are
    /// skipped (pruning is best-effort).
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<GqlPost>> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let mut posts = Vec::with_capacity(self.0.post_ids.len());
        for post_id in &self.0.post_ids {
            if let Ok(post) = feed.get(*post_id).await {
                posts.push(GqlPost::from(post));
            }
        }
        Ok(posts)
    }
}

/// Login result.
#[derive(SimpleObject)]
pub struct AuthData {
    pub token: String,
    pub user_id: ID,
}

/// One feed page plus the total post count.
#[derive(SimpleObject)]
#[graphql(name = "PostData")]
pub struct PostsPage {
    pub posts: Vec<GqlPost>,
    pub total_posts: u64,
}

#[derive(InputObject)]
#[graphql(name = "UserInputData")]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(InputObject)]
#[graphql(name = "PostInputData")]
pub struct PostInput {
    pub title: String,
    pub content: String,
    /// Omitted on create: the post starts without an image. Omitted on
    /// update: the stored image is kept.
    pub image_url: Option<String>,
}
