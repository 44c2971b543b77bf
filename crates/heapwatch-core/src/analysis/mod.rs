//! Per-snapshot analysis.
//!
//! One pass over all node records produces the fixed six-field resource
//! counts plus the open-ended constructor breakdown. The analyzer never
//! fails: undecodable or structurally invalid input yields an all-zero
//! result so the monitoring loop keeps running.

mod delta;
mod trend;

pub use delta::{ConstructorCountsDelta, constructor_delta};
pub use trend::{DEFAULT_LEAK_THRESHOLD, LeakDetector, LeakWarning};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{Bucket, Classification, Classifier, ResourceKind};
use crate::snapshot::{HeapGraph, RawSnapshot};

/// Type tag under which the engine files generic script objects.
/// Strings, numbers, closures, code objects etc. carry other tags and
/// never contribute to any count.
const OBJECT_TYPE_TAG: &str = "object";

/// Live-instance counts for the six tracked resource categories.
///
/// Serialized field names are part of the report contract.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCounts {
    pub geometry_count: u64,
    pub material_count: u64,
    pub texture_count: u64,
    pub render_target_count: u64,
    pub mesh_count: u64,
    pub group_count: u64,
}

impl ResourceCounts {
    /// Returns the count for one resource kind.
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Geometry => self.geometry_count,
            ResourceKind::Material => self.material_count,
            ResourceKind::Texture => self.texture_count,
            ResourceKind::RenderTarget => self.render_target_count,
            ResourceKind::Mesh => self.mesh_count,
            ResourceKind::Group => self.group_count,
        }
    }

    fn bump(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Geometry => self.geometry_count += 1,
            ResourceKind::Material => self.material_count += 1,
            ResourceKind::Texture => self.texture_count += 1,
            ResourceKind::RenderTarget => self.render_target_count += 1,
            ResourceKind::Mesh => self.mesh_count += 1,
            ResourceKind::Group => self.group_count += 1,
        }
    }
}

/// Open-ended per-name instance counts, split into known-library and
/// presumed-application buckets. `misc` is reserved and stays empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorCounts {
    pub threejs: BTreeMap<String, u64>,
    pub game: BTreeMap<String, u64>,
    pub misc: BTreeMap<String, u64>,
}

/// Everything one snapshot contained.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub node_counts: ResourceCounts,
    pub constructor_counts: ConstructorCounts,
}

/// Single-pass snapshot analyzer.
pub struct SnapshotAnalyzer {
    classifier: Classifier,
}

impl SnapshotAnalyzer {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Analyzes one complete snapshot payload.
    ///
    /// Accepts the raw serialized form; decoding and validation happen
    /// here. Returns an all-zero result on empty, undecodable, or
    /// structurally invalid input — data quality never surfaces as an
    /// error to the caller.
    pub fn analyze(&self, snapshot_json: &str) -> AnalysisResult {
        if snapshot_json.is_empty() {
            warn!("Cannot analyze empty snapshot data");
            return AnalysisResult::default();
        }

        let raw: RawSnapshot = match serde_json::from_str(snapshot_json) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Snapshot JSON did not decode: {}", e);
                return AnalysisResult::default();
            }
        };

        let Some(graph) = HeapGraph::from_raw(&raw) else {
            warn!("Snapshot decoded but essential structure (nodes, edges, strings, meta) is missing or invalid");
            return AnalysisResult::default();
        };

        self.scan(&graph)
    }

    fn scan(&self, graph: &HeapGraph) -> AnalysisResult {
        let mut result = AnalysisResult::default();

        // Edge contents are not interpreted, but the cursor is advanced
        // for every record so edge-array alignment holds if a future
        // pass walks edges.
        let mut edge_cursor = 0usize;

        for record in graph.records() {
            let advance = record.edge_count * graph.edge_stride();

            // Records with out-of-range type or name indices are
            // skipped; the pass continues.
            if let (Some(tag), Some(name)) = (graph.type_tag(&record), graph.name(&record))
                && tag == OBJECT_TYPE_TAG
            {
                match self.classifier.classify(name) {
                    Classification::Resource(kind) => result.node_counts.bump(kind),
                    Classification::Constructor(Bucket::ThreeJs) => {
                        *result
                            .constructor_counts
                            .threejs
                            .entry(name.to_string())
                            .or_insert(0) += 1;
                    }
                    Classification::Constructor(Bucket::Game) => {
                        *result
                            .constructor_counts
                            .game
                            .entry(name.to_string())
                            .or_insert(0) += 1;
                    }
                    Classification::Ignored => {}
                }
            }

            edge_cursor += advance;
        }

        if edge_cursor != graph.edge_value_count() {
            debug!(
                "Edge cursor ended at {} of {} edge values; node edge_count fields are inconsistent",
                edge_cursor,
                graph.edge_value_count()
            );
        }

        debug!(
            "Analyzed {} nodes: geo={} mat={} tex={} rt={} mesh={} grp={}",
            graph.node_count(),
            result.node_counts.geometry_count,
            result.node_counts.material_count,
            result.node_counts.texture_count,
            result.node_counts.render_target_count,
            result.node_counts.mesh_count,
            result.node_counts.group_count,
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::tests::snapshot_json;

    fn analyzer() -> SnapshotAnalyzer {
        SnapshotAnalyzer::new(Classifier::new())
    }

    /// Object-typed nodes named by `names`, type tag 3 = "object" in
    /// the fixture's tag table.
    fn object_snapshot(names: &[&str]) -> String {
        let nodes: Vec<(u64, u64, u64)> =
            (0..names.len()).map(|i| (3, i as u64, 0)).collect();
        snapshot_json(&nodes, names)
    }

    #[test]
    fn empty_input_yields_zero_result() {
        let result = analyzer().analyze("");
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn undecodable_input_yields_zero_result() {
        let result = analyzer().analyze("{not json");
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn structurally_invalid_input_yields_zero_result() {
        // Decodes fine, but has none of the required sections.
        let result = analyzer().analyze(r#"{"foo": 1}"#);
        assert_eq!(result, AnalysisResult::default());
        // All three category maps are present and empty.
        assert!(result.constructor_counts.threejs.is_empty());
        assert!(result.constructor_counts.game.is_empty());
        assert!(result.constructor_counts.misc.is_empty());
    }

    #[test]
    fn analysis_is_idempotent() {
        let json = object_snapshot(&["Mesh", "MeshStandardMaterial", "PlayerController"]);
        let a = analyzer();
        assert_eq!(a.analyze(&json), a.analyze(&json));
    }

    #[test]
    fn exact_match_counts_resource_not_constructor() {
        let result = analyzer().analyze(&object_snapshot(&["Mesh"]));
        assert_eq!(result.node_counts.mesh_count, 1);
        assert!(!result.constructor_counts.threejs.contains_key("Mesh"));
        assert!(!result.constructor_counts.game.contains_key("Mesh"));
    }

    #[test]
    fn excluded_broad_matches_do_not_count() {
        // "MeshLoader" is not an exact match and not a broad base type;
        // "MaterialLoader" contains "Material" but is vetoed by "Loader".
        let result = analyzer().analyze(&object_snapshot(&["MeshLoader", "MaterialLoader"]));
        assert_eq!(result.node_counts.mesh_count, 0);
        assert_eq!(result.node_counts.material_count, 0);
        // "MaterialLoader" is in the fixed loader denylist and drops out
        // entirely; "MeshLoader" is not in any table, so it reports as a
        // presumed application class.
        assert!(result.constructor_counts.threejs.is_empty());
        assert_eq!(result.constructor_counts.game["MeshLoader"], 1);
    }

    #[test]
    fn non_object_nodes_are_skipped() {
        // Same name indices, but tag 2 = "string": nothing counts.
        let json = snapshot_json(&[(2, 0, 0), (2, 1, 0)], &["Mesh", "PlayerController"]);
        let result = analyzer().analyze(&json);
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn duplicate_names_accumulate() {
        let result = analyzer().analyze(&object_snapshot(&[
            "PlayerController",
            "PlayerController",
            "PlayerController",
        ]));
        assert_eq!(result.constructor_counts.game["PlayerController"], 3);
    }

    #[test]
    fn end_to_end_scenario() {
        let result = analyzer().analyze(&object_snapshot(&[
            "BufferGeometry",
            "MeshStandardMaterial",
            "PlayerController",
        ]));
        assert_eq!(result.node_counts.geometry_count, 1);
        // MeshStandardMaterial broad-matches "Material", so it counts
        // as a resource and stays out of the constructor report.
        assert_eq!(result.node_counts.material_count, 1);
        assert!(result.constructor_counts.threejs.is_empty());
        assert_eq!(result.constructor_counts.game["PlayerController"], 1);
        assert!(result.constructor_counts.misc.is_empty());
    }

    #[test]
    fn library_names_without_resource_match_report_as_threejs() {
        let result = analyzer().analyze(&object_snapshot(&["Scene", "PerspectiveCamera"]));
        assert_eq!(result.constructor_counts.threejs["Scene"], 1);
        assert_eq!(result.constructor_counts.threejs["PerspectiveCamera"], 1);
        assert!(result.constructor_counts.game.is_empty());
    }

    #[test]
    fn resource_counts_serialize_with_contract_keys() {
        let counts = ResourceCounts {
            geometry_count: 1,
            render_target_count: 2,
            ..ResourceCounts::default()
        };
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["geometryCount"], 1);
        assert_eq!(json["renderTargetCount"], 2);
        assert_eq!(json["meshCount"], 0);
    }
}
