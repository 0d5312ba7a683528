//! User repository trait defining the interface for the identity collaborator.

use async_trait::async_trait;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Repository trait for user account lookup and creation
///
/// The identity collaborator owns user accounts; this component only reads
/// them by email and creates a minimal account when verification succeeds
/// for an address that has none.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address (callers pass a lower-cased value)
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Create a user account
    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError>;
}
