//! SQL text for the `users` table.
//!
//! Every select lists its columns by name; rows are decoded by column name, so
//! the order of the select list carries no meaning.

use sqlx::mysql::MySqlDatabaseError;

/// Name of the composite lookup index on `(name_id, identity_provider)`.
pub const USER_IDENTITY_INDEX: &str = "idx_users_name_id_provider";

pub const CREATE_USER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id            BIGINT        NOT NULL AUTO_INCREMENT,
    name_id            VARCHAR(255)  NOT NULL,
    identity_provider  VARCHAR(100)  NOT NULL,
    first_name         VARCHAR(100)  NOT NULL DEFAULT '',
    last_name          VARCHAR(100)  NOT NULL DEFAULT '',
    photo_url          VARCHAR(1024) NOT NULL DEFAULT '',
    email              VARCHAR(255)  NOT NULL DEFAULT '',
    phone_country_code INT           NOT NULL DEFAULT 0,
    phone_number       BIGINT        NOT NULL DEFAULT 0,
    date_created       DATETIME      NOT NULL,
    created_by         VARCHAR(255)  NOT NULL DEFAULT '',
    date_modified      DATETIME      NOT NULL,
    modified_by        VARCHAR(255)  NOT NULL DEFAULT '',
    PRIMARY KEY (user_id)
)
"#;

/// MySQL has no `CREATE INDEX IF NOT EXISTS`; this guards the index statement.
pub const USER_INDEX_EXISTS: &str = r#"
SELECT COUNT(*) FROM information_schema.statistics
WHERE table_schema = DATABASE() AND table_name = 'users' AND index_name = ?
"#;

pub const CREATE_USER_TABLE_INDEX: &str =
    "CREATE INDEX idx_users_name_id_provider ON users (name_id, identity_provider)";

/// Binds: name_id, identity_provider, first_name, last_name, photo_url, email,
/// phone_country_code, phone_number, date_created, created_by, date_modified,
/// modified_by.
pub const INSERT_USER: &str = r#"
INSERT INTO users (name_id, identity_provider, first_name, last_name, photo_url, email,
                   phone_country_code, phone_number, date_created, created_by,
                   date_modified, modified_by)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Binds: first_name, last_name, photo_url, email, phone_country_code,
/// phone_number, then the name_id key.
pub const UPDATE_USER_PROFILE: &str = r#"
UPDATE users
SET first_name = ?, last_name = ?, photo_url = ?, email = ?,
    phone_country_code = ?, phone_number = ?
WHERE name_id = ?
"#;

macro_rules! select_users {
    ($predicate:literal) => {
        concat!(
            "SELECT user_id, name_id, identity_provider, first_name, last_name, photo_url, email, ",
            "phone_country_code, phone_number, date_created, created_by, date_modified, modified_by ",
            "FROM users WHERE ",
            $predicate,
            " ORDER BY user_id"
        )
    };
}

pub const SELECT_USER_BY_ID: &str = select_users!("user_id = ?");

pub const SELECT_USERS_BY_NAME_ID: &str = select_users!("name_id = ?");

pub const SELECT_USERS_BY_NAME_ID_AND_PROVIDER: &str =
    select_users!("name_id = ? AND identity_provider = ?");

pub const SELECT_USERS_BY_FIRST_NAME: &str = select_users!("first_name LIKE ?");

pub const SELECT_USERS_BY_LAST_NAME: &str = select_users!("last_name LIKE ?");

pub const SELECT_USERS_BY_FIRST_OR_LAST_NAME: &str =
    select_users!("first_name LIKE ? OR last_name LIKE ?");

pub const SELECT_PHOTO_URL_BY_ID: &str = "SELECT photo_url FROM users WHERE user_id = ?";

/// Builds the `LIKE` pattern for a starts-with search.
///
/// The prefix is not escaped: `%` and `_` typed by the caller act as
/// wildcards, so `"%"` matches every row and `"J_n"` matches "Jan" and "Jon".
#[must_use]
pub fn like_prefix(prefix: &str) -> String {
    format!("{prefix}%")
}

/// MySQL `ER_DUP_KEYNAME`.
const ER_DUP_KEYNAME: u16 = 1061;

/// Whether `err` is MySQL rejecting an index whose name is already taken.
#[must_use]
pub fn is_duplicate_index(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .try_downcast_ref::<MySqlDatabaseError>()
            .is_some_and(|e| e.number() == ER_DUP_KEYNAME),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_prefix_appends_wildcard() {
        assert_eq!(like_prefix("Jo"), "Jo%");
        assert_eq!(like_prefix(""), "%");
    }

    #[test]
    fn test_like_prefix_keeps_caller_wildcards() {
        assert_eq!(like_prefix("%"), "%%");
        assert_eq!(like_prefix("J_n"), "J_n%");
    }

    #[test]
    fn test_select_shape() {
        assert!(SELECT_USER_BY_ID.starts_with("SELECT user_id, name_id,"));
        assert!(SELECT_USER_BY_ID.ends_with("WHERE user_id = ? ORDER BY user_id"));
        assert_eq!(SELECT_USERS_BY_FIRST_OR_LAST_NAME.matches('?').count(), 2);
        assert_eq!(INSERT_USER.matches('?').count(), 12);
        assert_eq!(UPDATE_USER_PROFILE.matches('?').count(), 7);
    }

    #[test]
    fn test_index_statement_uses_index_name() {
        assert!(CREATE_USER_TABLE_INDEX.contains(USER_IDENTITY_INDEX));
    }

    #[test]
    fn test_non_database_errors_are_not_duplicate_index() {
        assert!(!is_duplicate_index(&sqlx::Error::PoolClosed));
        assert!(!is_duplicate_index(&sqlx::Error::RowNotFound));
    }
}
