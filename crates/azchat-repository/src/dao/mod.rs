//! Data access objects for the `users` table.
//!
//! ```text
//! UserRepository → UserDao → MySQL
//! ```

pub mod r#impl;
pub mod user_dao;

pub use r#impl::MySqlUserDaoImpl;
pub use user_dao::UserDao;
