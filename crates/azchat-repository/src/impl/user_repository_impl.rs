//! Repository layer implementation of [`UserRepository`].
//!
//! ```text
//! Caller
//!   ↓ Arc<dyn UserRepository>
//! UserRepositoryImpl          ← validates input, delegates
//!   ↓ Arc<dyn UserDao>
//! MySqlUserDaoImpl
//!   ↓
//! MySQL
//! ```
//!
//! [`UserRepository`]: crate::traits::UserRepository
//! [`UserDao`]: crate::dao::UserDao

use crate::{dao::UserDao, traits::UserRepository};
use azchat_core::{AzchatResult, User, UserId, ValidateExt};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Repository implementation that orchestrates [`UserDao`] access.
///
/// [`UserDao`]: crate::dao::UserDao
#[derive(Component)]
#[shaku(interface = UserRepository)]
pub struct UserRepositoryImpl {
    #[shaku(inject)]
    user_dao: Arc<dyn UserDao>,
}

impl UserRepositoryImpl {
    /// Creates a new `UserRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>) -> Self {
        Self { user_dao }
    }

    fn validate(user: &User, operation: &'static str) -> AzchatResult<()> {
        user.validate_input().map_err(|e| {
            warn!(operation, name_id = %user.name_id, "Rejected user: {}", e);
            e
        })
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn save(&self, user: &User) -> AzchatResult<User> {
        debug!("Repository: save user {}", user.name_id);
        Self::validate(user, "save")?;
        self.user_dao.create(user).await
    }

    async fn find_by_id(&self, id: UserId) -> AzchatResult<Option<User>> {
        debug!("Repository: find_by_id {}", id);
        self.user_dao.find_by_id(id).await
    }

    async fn find_by_name_id(&self, name_id: &str) -> AzchatResult<Vec<User>> {
        debug!("Repository: find_by_name_id {}", name_id);
        self.user_dao.find_by_name_id(name_id).await
    }

    async fn find_by_identity(
        &self,
        name_id: &str,
        identity_provider: &str,
    ) -> AzchatResult<Vec<User>> {
        debug!("Repository: find_by_identity {} / {}", name_id, identity_provider);
        self.user_dao
            .find_by_name_id_and_provider(name_id, identity_provider)
            .await
    }

    async fn exists_by_identity(&self, name_id: &str, identity_provider: &str) -> AzchatResult<bool> {
        let users = self
            .user_dao
            .find_by_name_id_and_provider(name_id, identity_provider)
            .await?;
        Ok(!users.is_empty())
    }

    async fn search_by_first_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Repository: search_by_first_name {}", prefix);
        self.user_dao.find_by_first_name(prefix).await
    }

    async fn search_by_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Repository: search_by_last_name {}", prefix);
        self.user_dao.find_by_last_name(prefix).await
    }

    async fn search_by_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Repository: search_by_name {}", prefix);
        self.user_dao.find_by_first_or_last_name(prefix).await
    }

    async fn update_profile(&self, user: &User) -> AzchatResult<User> {
        debug!("Repository: update_profile {}", user.name_id);
        Self::validate(user, "update_profile")?;
        self.user_dao.update(user).await
    }

    async fn find_photo_url(&self, id: UserId) -> AzchatResult<Option<String>> {
        self.user_dao.find_photo_url(id).await
    }

    async fn ensure_schema(&self) -> AzchatResult<()> {
        debug!("Repository: ensure_schema");
        self.user_dao.create_user_table().await
    }
}

impl std::fmt::Debug for UserRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepositoryImpl").finish_non_exhaustive()
    }
}
