//! Feature Vector - Core data structure for model input
//!
//! A [`MarketSnapshot`] is what clients send; a [`FeatureVector`] is the same
//! values laid out in [`FEATURE_LAYOUT`] order, ready for the classifier.

use std::fmt;

use ndarray::Array1;
use serde::de::{value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};

// ============================================================================
// REQUEST SNAPSHOT
// ============================================================================

/// One observation of the nine market indicators.
///
/// Every field is required. JSON integers are accepted and widened to `f64`;
/// unknown fields are ignored. Only JSON objects are accepted, never
/// positional arrays.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct MarketSnapshot {
    #[serde(rename = "VIX")]
    pub vix: f64,
    #[serde(rename = "DXY")]
    pub dxy: f64,
    #[serde(rename = "GTDEM2Y")]
    pub gtdem2y: f64,
    #[serde(rename = "EONIA")]
    pub eonia: f64,
    #[serde(rename = "GTITL30YR")]
    pub gtitl30yr: f64,
    #[serde(rename = "GTITL2YR")]
    pub gtitl2yr: f64,
    #[serde(rename = "GTITL10YR")]
    pub gtitl10yr: f64,
    #[serde(rename = "GTJPY30YR")]
    pub gtjpy30yr: f64,
    #[serde(rename = "GTJPY2YR")]
    pub gtjpy2yr: f64,
}

impl MarketSnapshot {
    /// Values in layout order
    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector::from_values([
            self.vix,
            self.dxy,
            self.gtdem2y,
            self.eonia,
            self.gtitl30yr,
            self.gtitl2yr,
            self.gtitl10yr,
            self.gtjpy30yr,
            self.gtjpy2yr,
        ])
    }
}

impl<'de> Deserialize<'de> for MarketSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = MarketSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with the nine named market indicators")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Field handling comes from the derived (remote) impl
        MarketSnapshot::deserialize(MapAccessDeserializer::new(map))
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Feature values in the order defined by FEATURE_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values already in layout order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Copy into an ndarray row for the linear models
    pub fn to_array1(&self) -> Array1<f64> {
        Array1::from(self.values.to_vec())
    }

    /// Convert to JSON for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MarketSnapshot {
        MarketSnapshot {
            vix: 15.0,
            dxy: 95.0,
            gtdem2y: 1.0,
            eonia: -0.3,
            gtitl30yr: 2.0,
            gtitl2yr: 0.5,
            gtitl10yr: 1.5,
            gtjpy30yr: 0.6,
            gtjpy2yr: 0.1,
        }
    }

    #[test]
    fn test_snapshot_follows_layout_order() {
        let vector = sample().to_feature_vector();

        assert_eq!(
            vector.as_array(),
            &[15.0, 95.0, 1.0, -0.3, 2.0, 0.5, 1.5, 0.6, 0.1]
        );
    }

    #[test]
    fn test_snapshot_deserializes_uppercase_names_and_integers() {
        let json = r#"{
            "VIX": 15, "DXY": 95.0, "GTDEM2Y": 1.0, "EONIA": -0.3,
            "GTITL30YR": 2.0, "GTITL2YR": 0.5, "GTITL10YR": 1.5,
            "GTJPY30YR": 0.6, "GTJPY2YR": 0.1, "extra": "ignored"
        }"#;

        let snapshot: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot, sample());
    }

    #[test]
    fn test_snapshot_missing_field_names_the_field() {
        let json = r#"{"VIX": 15.0, "DXY": 95.0}"#;

        let err = serde_json::from_str::<MarketSnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("missing field `GTDEM2Y`"));
    }

    #[test]
    fn test_snapshot_rejects_positional_array() {
        let json = "[15.0, 95.0, 1.0, -0.3, 2.0, 0.5, 1.5, 0.6, 0.1]";

        let err = serde_json::from_str::<MarketSnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("invalid type: sequence"));
    }

    #[test]
    fn test_snapshot_rejects_scalar() {
        assert!(serde_json::from_str::<MarketSnapshot>("15.0").is_err());
    }

    #[test]
    fn test_to_log_entry_uses_feature_names() {
        let entry = sample().to_feature_vector().to_log_entry();
        assert_eq!(entry["VIX"], 15.0);
        assert_eq!(entry["GTJPY2YR"], 0.1);
    }

    #[test]
    fn test_to_array1() {
        let row = sample().to_feature_vector().to_array1();
        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row[1], 95.0);
    }
}
