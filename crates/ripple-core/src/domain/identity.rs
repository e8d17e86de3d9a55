use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::TokenService;

/// Per-request identity derived from an optional bearer token.
///
/// A missing token and a token that fails verification both yield the
/// anonymous identity - deriving an identity never rejects a request.
/// Whether anonymity is acceptable is decided per-operation downstream:
/// reads tolerate it, mutations call [`RequestIdentity::require`].
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    user_id: Option<Uuid>,
}

impl RequestIdentity {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Derive an identity from the value of an `Authorization` header.
    pub fn from_bearer(tokens: &dyn TokenService, header: Option<&str>) -> Self {
        let Some(header) = header else {
            return Self::anonymous();
        };
        let Some(token) = header.strip_prefix("Bearer ").map(str::trim) else {
            return Self::anonymous();
        };
        match tokens.verify(token) {
            Ok(claims) => Self::authenticated(claims.user_id),
            Err(_) => Self::anonymous(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// The authenticated user id, or `Unauthenticated` for anonymous
    /// requests.
    pub fn require(&self) -> Result<Uuid, DomainError> {
        self.user_id.ok_or(DomainError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AuthError, TokenClaims};

    /// Accepts exactly one token string.
    struct FixedTokenService {
        accepted: &'static str,
        user_id: Uuid,
    }

    impl TokenService for FixedTokenService {
        fn issue(&self, _user_id: Uuid, _email: &str) -> Result<String, AuthError> {
            Ok(self.accepted.to_string())
        }

        fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
            if token == self.accepted {
                Ok(TokenClaims {
                    user_id: self.user_id,
                    email: "a@x.com".to_string(),
                    exp: 0,
                })
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    fn service() -> FixedTokenService {
        FixedTokenService {
            accepted: "good-token",
            user_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn missing_header_is_anonymous() {
        let identity = RequestIdentity::from_bearer(&service(), None);
        assert!(!identity.is_authenticated());
        assert!(identity.require().is_err());
    }

    #[test]
    fn invalid_token_is_anonymous_not_an_error() {
        let identity = RequestIdentity::from_bearer(&service(), Some("Bearer expired-or-garbage"));
        assert!(!identity.is_authenticated());
    }

    #[test]
    fn non_bearer_scheme_is_anonymous() {
        let identity = RequestIdentity::from_bearer(&service(), Some("Basic abc"));
        assert!(!identity.is_authenticated());
    }

    #[test]
    fn valid_token_authenticates() {
        let tokens = service();
        let identity = RequestIdentity::from_bearer(&tokens, Some("Bearer good-token"));
        assert_eq!(identity.require().unwrap(), tokens.user_id);
    }
}
