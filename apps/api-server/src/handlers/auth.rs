//! Authentication handlers.

use actix_web::{HttpResponse, web};

use ripple_core::service::SignupInput;
use ripple_shared::dto::{
    LoginRequest, LoginResponse, SignupRequest, SignupResponse, StatusBody, StatusResponse,
    UpdateStatusResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// PUT /auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .auth
        .signup(SignupInput {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created".to_string(),
        user_id: user.id,
    }))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: session.token,
        user_id: session.user_id,
    }))
}

/// GET /auth/status
pub async fn get_status(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.auth.current_user(&identity).await?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        status: user.status,
    }))
}

/// PUT /auth/status
pub async fn update_status(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<StatusBody>,
) -> AppResult<HttpResponse> {
    let user = state
        .auth
        .update_status(&identity, body.into_inner().status)
        .await?;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        message: "Status updated".to_string(),
        status: user.status,
    }))
}
