//! V8 heap snapshot decoding and graph access.
//!
//! A heap snapshot arrives as one large JSON document: flat numeric
//! `nodes` and `edges` sequences, a string table, and a `meta` block
//! declaring the per-record field layout. `RawSnapshot` is the lenient
//! serde decode target; `HeapGraph` is the validated read-only view the
//! analyzer walks. Validation failure is a value (`None`), never a
//! panic — the monitoring loop must survive malformed captures.

mod schema;

pub use schema::{EdgeSchema, NodeSchema};

use serde::Deserialize;
use serde_json::Value;

/// Decode target for the heap snapshot JSON shape.
///
/// Every field is optional: presence and type are checked by
/// [`HeapGraph::from_raw`], not by the decoder, so a structurally
/// incomplete document decodes fine and fails validation gracefully.
/// Unknown fields (`node_count`, trace data, sample data) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    /// Header object carrying `meta`.
    pub snapshot: Option<RawHeader>,
    /// Flat node records, `node_fields.len()` values per node.
    pub nodes: Option<Vec<u64>>,
    /// Flat edge records, `edge_fields.len()` values per edge.
    pub edges: Option<Vec<u64>>,
    /// String table referenced by index from node records.
    pub strings: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawHeader {
    pub meta: Option<RawMeta>,
}

/// Declared record layout. `node_types` / `edge_types` are
/// heterogeneous in the wire format (the first element is the type-tag
/// name table, the rest are scalar field type names), so they stay as
/// raw JSON values until validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMeta {
    pub node_fields: Option<Vec<String>>,
    pub edge_fields: Option<Vec<String>>,
    pub node_types: Option<Vec<Value>>,
    pub edge_types: Option<Vec<Value>>,
}

/// One node record, with field values already extracted per the
/// resolved schema. Indices are unchecked here; resolution through
/// [`HeapGraph::type_tag`] and [`HeapGraph::name`] is bounds-checked.
#[derive(Debug, Clone, Copy)]
pub struct NodeRecord {
    /// Index into the type-tag table.
    pub type_index: usize,
    /// Index into the string table.
    pub name_index: usize,
    /// Number of consecutive edge records owned by this node.
    pub edge_count: usize,
}

/// Validated, read-only view over a decoded snapshot.
pub struct HeapGraph<'a> {
    nodes: &'a [u64],
    strings: &'a [String],
    type_tags: Vec<&'a str>,
    node_schema: NodeSchema,
    edge_schema: EdgeSchema,
    edge_value_count: usize,
}

impl<'a> HeapGraph<'a> {
    /// Validates the decoded snapshot shape and resolves field offsets.
    ///
    /// Requires `nodes`, `edges`, `strings`, both field lists, and the
    /// leading type-tag tables of `node_types` / `edge_types` to be
    /// present, and the required offsets to resolve. Returns `None`
    /// otherwise.
    pub fn from_raw(raw: &'a RawSnapshot) -> Option<Self> {
        let nodes = raw.nodes.as_deref()?;
        let edges = raw.edges.as_deref()?;
        let strings = raw.strings.as_deref()?;
        let meta = raw.snapshot.as_ref()?.meta.as_ref()?;

        let node_fields = meta.node_fields.as_deref()?;
        let edge_fields = meta.edge_fields.as_deref()?;
        let type_table = meta.node_types.as_deref()?.first()?.as_array()?;
        // Edge type tags are declared but unused; presence is still part
        // of the structural contract.
        meta.edge_types.as_deref()?.first()?.as_array()?;

        let node_schema = NodeSchema::resolve(node_fields)?;
        let edge_schema = EdgeSchema::resolve(edge_fields)?;

        // Non-string entries resolve to "" so table indices stay aligned.
        let type_tags = type_table
            .iter()
            .map(|v| v.as_str().unwrap_or(""))
            .collect();

        Some(Self {
            nodes,
            strings,
            type_tags,
            node_schema,
            edge_schema,
            edge_value_count: edges.len(),
        })
    }

    /// Iterates node records in layout order. A trailing partial record
    /// (nodes length not a multiple of the stride) is ignored.
    pub fn records(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        let schema = self.node_schema;
        self.nodes
            .chunks_exact(schema.stride)
            .map(move |chunk| NodeRecord {
                type_index: chunk[schema.type_tag] as usize,
                name_index: chunk[schema.name] as usize,
                edge_count: chunk[schema.edge_count] as usize,
            })
    }

    /// Resolves a record's type-tag string, `None` if out of range.
    pub fn type_tag(&self, record: &NodeRecord) -> Option<&'a str> {
        self.type_tags.get(record.type_index).copied()
    }

    /// Resolves a record's owning name, `None` if out of range.
    pub fn name(&self, record: &NodeRecord) -> Option<&'a str> {
        self.strings.get(record.name_index).map(String::as_str)
    }

    /// Number of complete node records.
    pub fn node_count(&self) -> usize {
        self.nodes.len() / self.node_schema.stride
    }

    /// Number of values per edge record.
    pub fn edge_stride(&self) -> usize {
        self.edge_schema.stride
    }

    /// Total number of values in the edge sequence, for cursor
    /// alignment checks.
    pub fn edge_value_count(&self) -> usize {
        self.edge_value_count
    }
}
