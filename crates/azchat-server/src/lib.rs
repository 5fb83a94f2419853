//! # AzChat Server Library
//!
//! Startup routine for the user store: wires the DI module, creates the
//! schema and checks the database is reachable.

pub mod startup;

pub use startup::{bootstrap, print_banner, print_startup_info};
