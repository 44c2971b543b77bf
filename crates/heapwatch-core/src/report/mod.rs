//! The per-cycle report record and its on-disk store.
//!
//! The serialized shape of [`Report`] is the one bit-exact contract the
//! core owns: existing viewers read
//! `{nodeCounts, constructorCounts, constructorCountsDelta}` exactly.

mod store;

pub use store::ReportStore;

use serde::{Deserialize, Serialize};

use crate::analysis::{
    AnalysisResult, ConstructorCounts, ConstructorCountsDelta, ResourceCounts, constructor_delta,
};

/// One monitoring cycle's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub node_counts: ResourceCounts,
    pub constructor_counts: ConstructorCounts,
    pub constructor_counts_delta: ConstructorCountsDelta,
    /// Attached by the store when reading back, derived from the
    /// filename. Never written for fresh reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Report {
    /// Builds the report for one analysis, diffing constructor counts
    /// against the previous cycle's (`None` on the first cycle, in
    /// which case the delta equals the current counts).
    pub fn from_analysis(result: &AnalysisResult, previous: Option<&ConstructorCounts>) -> Self {
        Self {
            node_counts: result.node_counts.clone(),
            constructor_counts: result.constructor_counts.clone(),
            constructor_counts_delta: constructor_delta(&result.constructor_counts, previous),
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_contract_keys() {
        let mut result = AnalysisResult::default();
        result.node_counts.geometry_count = 2;
        result
            .constructor_counts
            .game
            .insert("PlayerController".to_string(), 1);

        let report = Report::from_analysis(&result, None);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["nodeCounts"]["geometryCount"], 2);
        assert_eq!(json["constructorCounts"]["game"]["PlayerController"], 1);
        assert_eq!(json["constructorCountsDelta"]["game"]["PlayerController"], 1);
        // All three categories always serialize, even when empty.
        assert!(json["constructorCounts"]["misc"].as_object().unwrap().is_empty());
        // No timestamp key on fresh reports.
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn first_cycle_delta_equals_current() {
        let mut result = AnalysisResult::default();
        result
            .constructor_counts
            .threejs
            .insert("Scene".to_string(), 4);

        let report = Report::from_analysis(&result, None);
        assert_eq!(report.constructor_counts_delta.threejs["Scene"], 4);
    }

    #[test]
    fn round_trips_through_json() {
        let mut result = AnalysisResult::default();
        result.node_counts.texture_count = 7;
        let report = Report::from_analysis(&result, None);

        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
