//! Low-level user data access abstraction.
//!
//! Implementations connect directly to a single data source.
//! [`UserRepository`] uses a `UserDao` to fulfil domain-level operations.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use azchat_core::{AzchatResult, Interface, User, UserId};
use async_trait::async_trait;

/// Low-level user data access object.
///
/// Name searches are starts-with matches built by [`crate::sql::like_prefix`];
/// `%` and `_` in the prefix behave as wildcards.
#[async_trait]
pub trait UserDao: Interface + Send + Sync {
    /// Inserts a user and returns it with the store-generated id.
    async fn create(&self, user: &User) -> AzchatResult<User>;

    /// Finds a user by id. `None` when no row matches.
    async fn find_by_id(&self, id: UserId) -> AzchatResult<Option<User>>;

    /// Finds every user with the given name identifier.
    async fn find_by_name_id(&self, name_id: &str) -> AzchatResult<Vec<User>>;

    /// Finds every user matching both the name identifier and provider.
    async fn find_by_name_id_and_provider(
        &self,
        name_id: &str,
        identity_provider: &str,
    ) -> AzchatResult<Vec<User>>;

    /// Finds users whose first name starts with `prefix`.
    async fn find_by_first_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Finds users whose last name starts with `prefix`.
    async fn find_by_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Finds users whose first or last name starts with `prefix`.
    async fn find_by_first_or_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>>;

    /// Writes the mutable profile fields of every row with `user.name_id`.
    ///
    /// Returns `user` as given; the row is not read back.
    async fn update(&self, user: &User) -> AzchatResult<User>;

    /// Returns the photo URL of a user. `None` when no row matches.
    async fn find_photo_url(&self, id: UserId) -> AzchatResult<Option<String>>;

    /// Creates the `users` table and its lookup index when missing.
    async fn create_user_table(&self) -> AzchatResult<()>;
}
