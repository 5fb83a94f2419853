//! DAO implementations, one submodule per storage engine.

pub mod mysql;

pub use mysql::MySqlUserDaoImpl;
