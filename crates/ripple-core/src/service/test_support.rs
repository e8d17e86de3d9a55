//! In-memory port doubles for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FeedEvent, Post, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, FeedPublisher, ImageCleanup, PasswordService, PostRepository,
    TokenClaims, TokenService, UserRepository,
};

/// In-memory user repository; `fail_next_save` simulates a storage fault
/// on the next write.
#[derive(Default)]
pub struct TestUsers {
    store: Mutex<HashMap<Uuid, User>>,
    fail_next_save: AtomicBool,
}

impl TestUsers {
    pub async fn insert(&self, user: User) {
        self.store.lock().unwrap().insert(user.id, user);
    }

    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.store.lock().unwrap().get(&id).cloned()
    }

    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for TestUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(RepoError::Query("injected save failure".into()));
        }
        self.store.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for TestUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct TestPosts {
    store: Mutex<HashMap<Uuid, Post>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for TestPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.store.lock().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for TestPosts {
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.store.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        Ok(self.store.lock().unwrap().len() as u64)
    }
}

/// Records published events instead of delivering them.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<FeedEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<FeedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl FeedPublisher for RecordingPublisher {
    fn publish(&self, event: FeedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Records scheduled deletions instead of touching a filesystem.
#[derive(Default)]
pub struct RecordingCleanup {
    paths: Mutex<Vec<String>>,
}

impl RecordingCleanup {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl ImageCleanup for RecordingCleanup {
    fn schedule_delete(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Identity hashing, sufficient for service-level tests.
pub struct PlainPasswordService;

impl PasswordService for PlainPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Issues predictable tokens of the form `token:<user_id>`.
#[derive(Default)]
pub struct StubTokenService;

impl TokenService for StubTokenService {
    fn issue(&self, user_id: Uuid, _email: &str) -> Result<String, AuthError> {
        Ok(format!("token:{user_id}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let user_id = token
            .strip_prefix("token:")
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or(AuthError::InvalidToken)?;
        Ok(TokenClaims {
            user_id,
            email: String::new(),
            exp: 0,
        })
    }
}
