//! Features Module - model input schema
//!
//! The layout fixes the order of the nine market indicators; the vector
//! types carry request values into the classifier in that order.

pub mod layout;
pub mod vector;

// Re-export common types
pub use layout::{LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::{FeatureVector, MarketSnapshot};
