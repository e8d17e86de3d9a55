//! GraphQL surface.
//!
//! The resolvers are thin adapters over the same `AuthService` and
//! `FeedService` the REST handlers use, so both surfaces make identical
//! authorization, ownership, validation, and pagination decisions.
//! Errors carry `{code, data?}` extensions, with `data` holding
//! field-level validation errors.

mod types;

use std::sync::Arc;

use actix_web::web;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Result, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use uuid::Uuid;

use ripple_core::DomainError;
use ripple_core::domain::RequestIdentity;
use ripple_core::service::{
    AuthService, FeedService, ImagePatch, NewPostInput, PageRequest, SignupInput, UpdatePostInput,
};

use crate::middleware::auth::Identity;

pub use types::{AuthData, GqlPost, GqlUser, PostInput, PostsPage, UserInput};

pub type RippleSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the shared services attached.
pub fn build_schema(auth: Arc<AuthService>, feed: Arc<FeedService>) -> RippleSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth)
        .data(feed)
        .finish()
}

/// POST /graphql
pub async fn graphql_handler(
    schema: web::Data<RippleSchema>,
    identity: Identity,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(identity.0);
    schema.execute(request).await.into()
}

/// Map a domain error onto a GraphQL error with `{code, data}` extensions.
pub(crate) fn gql_error(err: DomainError) -> async_graphql::Error {
    let code: i32 = match &err {
        DomainError::Validation(_) => 422,
        DomainError::Unauthenticated => 401,
        DomainError::Forbidden => 403,
        DomainError::NotFound { .. } => 404,
        DomainError::Conflict(_) => 409,
        DomainError::Internal(_) => 500,
    };

    let message = match &err {
        DomainError::Validation(_) => "Invalid input".to_string(),
        DomainError::Internal(detail) => {
            // Log the detail, never leak it.
            tracing::error!("Internal error: {}", detail);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    let mut error = async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code));

    if let DomainError::Validation(fields) = &err {
        if let Some(data) = serde_json::to_value(fields)
            .ok()
            .and_then(|value| async_graphql::Value::from_json(value).ok())
        {
            error = error.extend_with(|_, e| e.set("data", data));
        }
    }

    error
}

fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str())
        .map_err(|_| async_graphql::Error::new("Invalid id").extend_with(|_, e| e.set("code", 422)))
}

fn current_identity(ctx: &Context<'_>) -> RequestIdentity {
    // Absent identity data means the request never went through the
    // identity extractor; treat it as anonymous.
    ctx.data::<RequestIdentity>()
        .map(Clone::clone)
        .unwrap_or_default()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// One feed page, newest first.
    async fn posts(&self, ctx: &Context<'_>, page: Option<u64>) -> Result<PostsPage> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let result = feed.list(PageRequest::new(page)).await.map_err(gql_error)?;
        Ok(PostsPage {
            posts: result.posts.into_iter().map(GqlPost::from).collect(),
            total_posts: result.total_count,
        })
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<GqlPost> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let post_id = parse_id(&id)?;
        feed.get(post_id).await.map(GqlPost::from).map_err(gql_error)
    }

    /// The authenticated account.
    async fn user(&self, ctx: &Context<'_>) -> Result<GqlUser> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();

        auth.current_user(&current_identity(ctx))
            .await
            .map(GqlUser::from)
            .map_err(gql_error)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInput) -> Result<GqlUser> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();

        auth.signup(SignupInput {
            email: user_input.email,
            name: user_input.name,
            password: user_input.password,
        })
        .await
        .map(GqlUser::from)
        .map_err(gql_error)
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthData> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();

        let session = auth.login(&email, &password).await.map_err(gql_error)?;
        Ok(AuthData {
            token: session.token,
            user_id: ID(session.user_id.to_string()),
        })
    }

    async fn create_post(&self, ctx: &Context<'_>, post_input: PostInput) -> Result<GqlPost> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let created = feed
            .create(
                &current_identity(ctx),
                NewPostInput {
                    title: post_input.title,
                    content: post_input.content,
                    image_url: post_input.image_url,
                },
            )
            .await
            .map_err(gql_error)?;
        Ok(GqlPost::from(created.post))
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInput,
    ) -> Result<GqlPost> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let post_id = parse_id(&id)?;
        let image = match post_input.image_url {
            Some(url) => ImagePatch::Set(url),
            None => ImagePatch::Unchanged,
        };

        feed.update(
            &current_identity(ctx),
            post_id,
            UpdatePostInput {
                title: post_input.title,
                content: post_input.content,
                image,
            },
        )
        .await
        .map(GqlPost::from)
        .map_err(gql_error)
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let feed = ctx.data_unchecked::<Arc<FeedService>>();

        let post_id = parse_id(&id)?;
        feed.delete(&current_identity(ctx), post_id)
            .await
            .map_err(gql_error)?;
        Ok(true)
    }

    async fn update_status(&self, ctx: &Context<'_>, status: String) -> Result<GqlUser> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();

        auth.update_status(&current_identity(ctx), status)
            .await
            .map(GqlUser::from)
            .map_err(gql_error)
    }
}
