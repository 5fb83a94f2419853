//! Domain entities.

pub mod user;

pub use user::User;
