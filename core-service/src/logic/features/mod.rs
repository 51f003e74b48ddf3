//! Features Module - Record Encoding
//!
//! Maps raw identity records onto the fixed feature layout.

pub mod encoder;
pub mod layout;
pub mod vector;


// Re-export common types
pub use encoder::{DeviceEncoder, UNKNOWN_DEVICE_CODE};
pub use layout::{feature_index, feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::FeatureVector;
