//! Identity extraction from the Authorization header.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use ripple_core::domain::RequestIdentity;

use crate::state::AppState;

/// Actix extractor wrapping [`RequestIdentity`].
///
/// Extraction never rejects a request: a missing, malformed, or invalid
/// bearer token yields the anonymous identity, and each operation decides
/// downstream whether anonymity is acceptable.
///
/// ```ignore
/// async fn create_post(identity: Identity, ...) -> AppResult<HttpResponse> {
///     state.feed.create(&identity, input).await?; // 401s inside the service
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub RequestIdentity);

impl std::ops::Deref for Identity {
    type Target = RequestIdentity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Ok(Identity(RequestIdentity::anonymous())));
        };

        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let identity = RequestIdentity::from_bearer(state.tokens.as_ref(), header);
        ready(Ok(Identity(identity)))
    }
}
