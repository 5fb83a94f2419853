//! # AzChat Core
//!
//! Core types and error definitions for the AzChat user store.
//! Every other crate in the workspace builds on the [`User`] entity, the
//! [`AzchatError`] taxonomy and the [`AzchatResult`] alias defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
