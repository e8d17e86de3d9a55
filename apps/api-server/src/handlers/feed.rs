//! Feed handlers - paginated reads and ownership-gated post mutations.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use ripple_core::DomainError;
use ripple_core::domain::FieldError;
use ripple_core::service::{ImagePatch, NewPostInput, PageRequest, UpdatePostInput};
use ripple_shared::dto::{
    CreatePostResponse, FeedResponse, PostBody, PostCreator, PostResponse,
};
use ripple_shared::response::MessageBody;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u64>,
}

/// Pull the image reference out of a post body; this surface requires one.
fn required_image(image_url: Option<String>) -> Result<String, DomainError> {
    image_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            DomainError::Validation(vec![FieldError::new("imageUrl", "No image provided")])
        })
}

/// GET /feed/posts?page=N
pub async fn get_posts(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::new(query.page);
    let feed = state.feed.list(page).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        message: "Fetched posts successfully".to_string(),
        posts: feed.posts,
        total_items: feed.total_count,
    }))
}

/// GET /feed/post/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.feed.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        message: "Post fetched".to_string(),
        post,
    }))
}

/// POST /feed/post
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostBody>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let image_url = required_image(req.image_url)?;

    let created = state
        .feed
        .create(
            &identity,
            NewPostInput {
                title: req.title,
                content: req.content,
                image_url: Some(image_url),
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(CreatePostResponse {
        message: "Post created successfully!".to_string(),
        post: created.post,
        creator: PostCreator {
            id: created.creator.id,
            name: created.creator.name,
        },
    }))
}

/// PUT /feed/post/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostBody>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let image_url = required_image(req.image_url)?;

    let post = state
        .feed
        .update(
            &identity,
            path.into_inner(),
            UpdatePostInput {
                title: req.title,
                content: req.content,
                image: ImagePatch::Set(image_url),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        message: "Post updated".to_string(),
        post,
    }))
}

/// DELETE /feed/post/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.feed.delete(&identity, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageBody::new("Post deleted successfully")))
}
