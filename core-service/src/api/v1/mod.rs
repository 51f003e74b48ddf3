//! API v1 Module
//!
//! Re-exports the current stable API commands for versioning.

pub use super::commands::*;
