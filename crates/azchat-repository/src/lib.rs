//! # AzChat Repository
//!
//! Layered user data access:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! UserRepositoryImpl            (validates input, delegates)
//!   ↓  Arc<dyn UserDao>         (DAO interface)
//! MySqlUserDaoImpl              (MySQL via SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   sql.rs                       ← statement text
//!   pool.rs                      ← DatabasePool
//!   traits.rs                    ← UserRepository trait
//!   di.rs                        ← Shaku module
//!   impl/
//!     user_repository_impl.rs    ← UserRepositoryImpl
//!   dao/
//!     user_dao.rs                ← UserDao trait
//!     impl/mysql/
//!       user_dao_impl.rs         ← MySqlUserDaoImpl
//! ```

pub mod dao;
pub mod di;
pub mod pool;
pub mod sql;
pub mod traits;
pub mod r#impl;

pub use dao::{MySqlUserDaoImpl, UserDao};
pub use di::{build_user_store_module, UserStoreModule};
pub use pool::*;
pub use traits::*;
pub use r#impl::UserRepositoryImpl;
