//! Account signup, login, and status - the user directory operations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{RequestIdentity, User, normalize_email, validate_signup};
use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Signup request, pre-normalization.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// A successful login: the issued token plus the account it identifies.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Uuid,
}

/// User directory service: owns account creation, credential checks, and
/// the status field.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// The duplicate-email check runs before the insert; a concurrent
    /// duplicate that slips through is caught by the storage layer's
    /// unique index and surfaces as the same `Conflict`.
    pub async fn signup(&self, input: SignupInput) -> Result<User, DomainError> {
        let email = normalize_email(&input.email);
        let errors = validate_signup(&email, &input.name, &input.password);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("The email is already registered".into()));
        }

        let password_hash = self
            .passwords
            .hash(input.password.trim())
            .map_err(internal)?;

        let user = User::new(email, input.name.trim().to_string(), password_hash);
        Ok(self.users.save(user).await?)
    }

    /// Verify credentials and issue a token.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller; both return `Unauthenticated`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(DomainError::Unauthenticated);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(internal)?;
        if !valid {
            return Err(DomainError::Unauthenticated);
        }

        let token = self.tokens.issue(user.id, &user.email).map_err(internal)?;
        Ok(AuthSession {
            token,
            user_id: user.id,
        })
    }

    /// Load the authenticated user's record.
    pub async fn current_user(&self, identity: &RequestIdentity) -> Result<User, DomainError> {
        let user_id = identity.require()?;
        self.find_user(user_id).await
    }

    /// Load any user by id, for cross-entity lookups (e.g. a post's
    /// creator).
    pub async fn find_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: user_id,
            })
    }

    /// Replace the authenticated user's status line.
    pub async fn update_status(
        &self,
        identity: &RequestIdentity,
        status: String,
    ) -> Result<User, DomainError> {
        let mut user = self.current_user(identity).await?;
        user.status = status;
        user.updated_at = Utc::now();
        Ok(self.users.save(user).await?)
    }
}

fn internal(err: AuthError) -> DomainError {
    DomainError::Internal(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{PlainPasswordService, StubTokenService, TestUsers};

    fn service() -> (AuthService, Arc<TestUsers>) {
        let users = Arc::new(TestUsers::default());
        let auth = AuthService::new(
            users.clone(),
            Arc::new(PlainPasswordService),
            Arc::new(StubTokenService::default()),
        );
        (auth, users)
    }

    fn signup_input() -> SignupInput {
        SignupInput {
            email: "a@x.com".into(),
            name: "A".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn signup_then_login_round_trip() {
        let (auth, _) = service();

        let user = auth.signup(signup_input()).await.unwrap();
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.status, crate::domain::DEFAULT_STATUS);

        let session = auth.login("a@x.com", "secret").await.unwrap();
        assert_eq!(session.user_id, user.id);
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn signup_normalizes_email() {
        let (auth, _) = service();

        auth.signup(SignupInput {
            email: " A@X.Com ".into(),
            ..signup_input()
        })
        .await
        .unwrap();

        // Login with a differently-cased spelling of the same address.
        assert!(auth.login("a@X.com", "secret").await.is_ok());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email_as_conflict() {
        let (auth, _) = service();
        auth.signup(signup_input()).await.unwrap();

        let err = auth.signup(signup_input()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn signup_surfaces_field_errors() {
        let (auth, _) = service();

        let err = auth
            .signup(SignupInput {
                email: "nope".into(),
                name: "".into(),
                password: "abc".into(),
            })
            .await
            .unwrap_err();

        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (auth, _) = service();
        auth.signup(signup_input()).await.unwrap();

        let unknown = auth.login("other@x.com", "secret").await.unwrap_err();
        let wrong_password = auth.login("a@x.com", "nope").await.unwrap_err();

        assert!(matches!(unknown, DomainError::Unauthenticated));
        assert!(matches!(wrong_password, DomainError::Unauthenticated));
        assert_eq!(unknown.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn status_requires_authentication() {
        let (auth, _) = service();

        let err = auth
            .update_status(&RequestIdentity::anonymous(), "hi".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn update_status_persists() {
        let (auth, _) = service();
        let user = auth.signup(signup_input()).await.unwrap();
        let identity = RequestIdentity::authenticated(user.id);

        let updated = auth
            .update_status(&identity, "Shipping things".into())
            .await
            .unwrap();
        assert_eq!(updated.status, "Shipping things");

        let reloaded = auth.current_user(&identity).await.unwrap();
        assert_eq!(reloaded.status, "Shipping things");
    }
}
