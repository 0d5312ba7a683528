//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// In-memory user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, UserAccount>>>,
    should_fail: bool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mock repository whose every operation fails
    pub fn failing() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Number of accounts currently stored
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "mock user repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError> {
        self.check_failure()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}
