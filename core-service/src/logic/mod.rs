//! Logic Module - Scoring Engine Internals
//!
//! ## Structure
//! - `dataset/` - record types, generator, labeler, corpus CSV
//! - `features/` - feature layout, vector, device encoder
//! - `model/` - decision tree + random forest
//! - `risk/` - risk tiers and explanations
//! - `engine` - fit once, score many

pub mod config;
pub mod dataset;
pub mod engine;
pub mod features;
pub mod model;
pub mod risk;
