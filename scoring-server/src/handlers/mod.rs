//! HTTP handlers

pub mod health;
pub mod score;
pub mod status;
