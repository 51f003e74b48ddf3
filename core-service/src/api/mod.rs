//! API Module
//!
//! Caller-facing boundary of the scoring engine, with versioning for
//! backward compatibility.
//!
//! Structure:
//! - commands.rs: Current stable API implementation
//! - request.rs: Loosely typed score request (integer coercion)
//! - engine_status.rs: Engine / model status snapshot
//! - v1/mod.rs: Re-exports commands as v1 API
//!
//! Usage:
//! - `api::commands::score_record(...)` - Direct access
//! - `api::v1::score_record(...)` - Version 1 API

pub mod commands;
pub mod engine_status;
pub mod request;
pub mod v1;

// Re-export current version as default
pub use commands::*;
