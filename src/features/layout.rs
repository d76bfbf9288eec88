//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema shared with the trained model.**
//!
//! ## Rules
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The model artifact stores the names it was trained on and is rejected at
//! startup when they differ from this layout.

use crc32fast::Hasher;
use serde::Serialize;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact order the classifier was trained on
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Risk sentiment (0-1) ===
    "VIX",        // 0: CBOE volatility index
    "DXY",        // 1: US dollar index

    // === Euro area short end (2-3) ===
    "GTDEM2Y",    // 2: German 2Y government yield
    "EONIA",      // 3: Euro overnight index average

    // === Italy curve (4-6) ===
    "GTITL30YR",  // 4: Italian 30Y government yield
    "GTITL2YR",   // 5: Italian 2Y government yield
    "GTITL10YR",  // 6: Italian 10Y government yield

    // === Japan curve (7-8) ===
    "GTJPY30YR",  // 7: Japanese 30Y government yield
    "GTJPY2YR",   // 8: Japanese 2Y government yield
];

/// Total number of features
/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 9;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a feature layout doesn't match the current one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutMismatchError {
    #[error("feature layout mismatch: expected hash {expected:08x}, got {actual:08x}")]
    Hash { expected: u32, actual: u32 },

    #[error("feature layout mismatch: expected {expected} features, got {actual}")]
    Count { expected: usize, actual: usize },

    #[error("feature layout mismatch at position {index}: expected `{expected}`, got `{actual}`")]
    Name {
        index: usize,
        expected: &'static str,
        actual: String,
    },
}

/// Validate that a layout hash matches the current layout
pub fn validate_layout_hash(incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current = layout_hash();
    if incoming_hash != current {
        return Err(LayoutMismatchError::Hash {
            expected: current,
            actual: incoming_hash,
        });
    }
    Ok(())
}

/// Validate that a list of feature names matches the layout, order included
pub fn validate_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    if names.len() != FEATURE_COUNT {
        return Err(LayoutMismatchError::Count {
            expected: FEATURE_COUNT,
            actual: names.len(),
        });
    }

    for (index, (expected, actual)) in FEATURE_LAYOUT.iter().zip(names).enumerate() {
        if *expected != actual.as_ref() {
            return Err(LayoutMismatchError::Name {
                index,
                expected: *expected,
                actual: actual.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
