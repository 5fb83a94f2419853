//! Repository trait definitions.

use azchat_core::{AzchatResult, Interface, User, UserId};
use async_trait::async_trait;

/// User repository trait.
///
/// Entry point for registration, profile lookup/search and profile update.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Validates and saves a new user, returning it with its assigned id.
    async fn save(&self, user: &User) -> AzchatResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> AzchatResult<Option<User>>;

    /// Finds all users sharing a name identifier.
    async fn find_by_name_id(&self, name_id: &str) -> AzchatResult<Vec<User>>;

    /// Finds users by name identifier and identity provider.
    async fn find_by_identity(
        &self,
        name_id: &str,
        identity_provider: &str,
    ) -> AzchatResult<Vec<User>>;

    /// Checks if a user is already registered with this identity.
    async fn exists_by_identity(&self, name_id: &str, identity_provider: &str) -> AzchatResult<bool>;

    /// Finds users whose first name starts with `prefix`.
    async fn search_by_first_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Finds users whose last name starts with `prefix`.
    async fn search_by_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Finds users whose first or last name starts with `prefix`.
    async fn search_by_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Validates and writes the mutable profile fields.
    async fn update_profile(&self, user: &User) -> AzchatResult<User>;

    /// Returns the user's photo URL, `None` if the user does not exist.
    async fn find_photo_url(&self, id: UserId) -> AzchatResult<Option<String>>;

    /// Creates the backing table and index.
    async fn ensure_schema(&self) -> AzchatResult<()>;
}
