//! Data Transfer Objects - request/response types for the REST API.
//!
//! Field names follow the original wire format (camelCase).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ripple_core::domain::Post;

/// Request to sign up a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Successful login: the token plus the account it identifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

/// Body for creating or updating a post.
///
/// `image_url` is optional in the type so updates can distinguish an
/// omitted field; the REST handlers reject a missing image themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// One page of the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub message: String,
    pub posts: Vec<Post>,
    pub total_items: u64,
}

/// A single post wrapped in a `{message, post}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub message: String,
    pub post: Post,
}

/// Creation response additionally echoes the creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: Post,
    pub creator: PostCreator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreator {
    pub id: Uuid,
    pub name: String,
}

/// Body for replacing the user's status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// The user's current status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Status update confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub status: String,
}
