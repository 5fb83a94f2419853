//! MySQL user DAO implementation.

use crate::{dao::UserDao, sql, DatabasePoolInterface};
use azchat_core::{AzchatError, AzchatResult, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, error, info};

/// MySQL-backed [`UserDao`].
#[derive(Component, Clone)]
#[shaku(interface = UserDao)]
pub struct MySqlUserDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserDaoImpl {
    /// Creates a new MySQL user DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn fetch_users(
        &self,
        operation: &'static str,
        query: &'static str,
        binds: &[&str],
    ) -> AzchatResult<Vec<User>> {
        let mut statement = sqlx::query_as::<_, UserRow>(query);
        for value in binds {
            statement = statement.bind(*value);
        }

        let rows = statement
            .fetch_all(self.pool.inner())
            .await
            .map_err(query_failed(operation))?;

        debug!(operation, rows = rows.len(), "User query returned");
        Ok(rows.into_iter().map(User::from).collect())
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    user_id: i64,
    name_id: String,
    identity_provider: String,
    first_name: String,
    last_name: String,
    photo_url: String,
    email: String,
    phone_country_code: i32,
    phone_number: i64,
    date_created: DateTime<Utc>,
    created_by: String,
    date_modified: DateTime<Utc>,
    modified_by: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.user_id),
            name_id: row.name_id,
            identity_provider: row.identity_provider,
            first_name: row.first_name,
            last_name: row.last_name,
            photo_url: row.photo_url,
            email: row.email,
            phone_country_code: row.phone_country_code,
            phone_number: row.phone_number,
            date_created: row.date_created,
            created_by: row.created_by,
            date_modified: row.date_modified,
            modified_by: row.modified_by,
        }
    }
}

/// Logs a driver failure under its operation name and classifies it.
fn query_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AzchatError {
    move |e| {
        let err = AzchatError::from(e);
        error!(operation, code = err.error_code(), "User query failed: {}", err);
        err
    }
}

#[async_trait]
impl UserDao for MySqlUserDaoImpl {
    async fn create(&self, user: &User) -> AzchatResult<User> {
        debug!("Saving new user: {} ({})", user.name_id, user.identity_provider);

        let result = sqlx::query(sql::INSERT_USER)
            .bind(&user.name_id)
            .bind(&user.identity_provider)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.photo_url)
            .bind(&user.email)
            .bind(user.phone_country_code)
            .bind(user.phone_number)
            .bind(user.date_created)
            .bind(&user.created_by)
            .bind(user.date_modified)
            .bind(&user.modified_by)
            .execute(self.pool.inner())
            .await
            .map_err(query_failed("create"))?;

        let generated = result.last_insert_id();
        if generated == 0 {
            error!(operation = "create", "Insert returned no generated key");
            return Err(AzchatError::not_found("generated_key", "users.user_id"));
        }
        let id = i64::try_from(generated)
            .map_err(|_| AzchatError::internal(format!("Generated key {} out of range", generated)))?;

        Ok(user.clone().with_id(UserId::new(id)))
    }

    async fn find_by_id(&self, id: UserId) -> AzchatResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(sql::SELECT_USER_BY_ID)
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await
            .map_err(query_failed("find_by_id"))?;

        Ok(row.map(User::from))
    }

    async fn find_by_name_id(&self, name_id: &str) -> AzchatResult<Vec<User>> {
        debug!("Finding users by name id: {}", name_id);
        self.fetch_users("find_by_name_id", sql::SELECT_USERS_BY_NAME_ID, &[name_id])
            .await
    }

    async fn find_by_name_id_and_provider(
        &self,
        name_id: &str,
        identity_provider: &str,
    ) -> AzchatResult<Vec<User>> {
        debug!("Finding users by name id {} and provider {}", name_id, identity_provider);
        self.fetch_users(
            "find_by_name_id_and_provider",
            sql::SELECT_USERS_BY_NAME_ID_AND_PROVIDER,
            &[name_id, identity_provider],
        )
        .await
    }

    async fn find_by_first_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Finding users by first name prefix: {}", prefix);
        let pattern = sql::like_prefix(prefix);
        self.fetch_users("find_by_first_name", sql::SELECT_USERS_BY_FIRST_NAME, &[pattern.as_str()])
            .await
    }

    async fn find_by_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Finding users by last name prefix: {}", prefix);
        let pattern = sql::like_prefix(prefix);
        self.fetch_users("find_by_last_name", sql::SELECT_USERS_BY_LAST_NAME, &[pattern.as_str()])
            .await
    }

    async fn find_by_first_or_last_name(&self, prefix: &str) -> AzchatResult<Vec<User>> {
        debug!("Finding users by first or last name prefix: {}", prefix);
        let pattern = sql::like_prefix(prefix);
        self.fetch_users(
            "find_by_first_or_last_name",
            sql::SELECT_USERS_BY_FIRST_OR_LAST_NAME,
            &[pattern.as_str(), pattern.as_str()],
        )
        .await
    }

    async fn update(&self, user: &User) -> AzchatResult<User> {
        debug!("Updating users with name id: {}", user.name_id);

        let result = sqlx::query(sql::UPDATE_USER_PROFILE)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.photo_url)
            .bind(&user.email)
            .bind(user.phone_country_code)
            .bind(user.phone_number)
            .bind(&user.name_id)
            .execute(self.pool.inner())
            .await
            .map_err(query_failed("update"))?;

        debug!(rows = result.rows_affected(), "User profile updated");
        Ok(user.clone())
    }

    async fn find_photo_url(&self, id: UserId) -> AzchatResult<Option<String>> {
        debug!("Finding photo url for user: {}", id);

        sqlx::query_scalar::<_, String>(sql::SELECT_PHOTO_URL_BY_ID)
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await
            .map_err(query_failed("find_photo_url"))
    }

    async fn create_user_table(&self) -> AzchatResult<()> {
        info!("Creating users table if missing");

        {
            let mut conn = self
                .pool
                .inner()
                .acquire()
                .await
                .map_err(query_failed("create_user_table"))?;
            sqlx::query(sql::CREATE_USER_TABLE)
                .execute(&mut *conn)
                .await
                .map_err(query_failed("create_user_table"))?;
        }

        let mut conn = self
            .pool
            .inner()
            .acquire()
            .await
            .map_err(query_failed("create_user_table_index"))?;

        let existing: i64 = sqlx::query_scalar(sql::USER_INDEX_EXISTS)
            .bind(sql::USER_IDENTITY_INDEX)
            .fetch_one(&mut *conn)
            .await
            .map_err(query_failed("create_user_table_index"))?;

        if existing == 0 {
            match sqlx::query(sql::CREATE_USER_TABLE_INDEX)
                .execute(&mut *conn)
                .await
            {
                Ok(_) => info!(index = sql::USER_IDENTITY_INDEX, "Created users index"),
                // Another process created it between the check and the create.
                Err(e) if sql::is_duplicate_index(&e) => {
                    debug!(index = sql::USER_IDENTITY_INDEX, "Users index created concurrently");
                }
                Err(e) => return Err(query_failed("create_user_table_index")(e)),
            }
        } else {
            debug!(index = sql::USER_IDENTITY_INDEX, "Users index already present");
        }

        Ok(())
    }
}

impl std::fmt::Debug for MySqlUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserDaoImpl").finish_non_exhaustive()
    }
}
