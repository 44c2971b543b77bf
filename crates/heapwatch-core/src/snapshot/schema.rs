//! Positional field-offset resolution for the flat snapshot encoding.
//!
//! A heap snapshot declares its record layout in `snapshot.meta`:
//! `node_fields` and `edge_fields` list field names in record order.
//! Resolving the offsets once per snapshot turns every later access
//! into a plain index, and makes the bounds-checked access pattern
//! testable in isolation.

/// Offsets of the node fields the traversal needs, plus the record stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSchema {
    /// Offset of the `name` field (index into the string table).
    pub name: usize,
    /// Offset of the `type` field (index into the type-tag table).
    pub type_tag: usize,
    /// Offset of the `edge_count` field (owned consecutive edge records).
    pub edge_count: usize,
    /// Number of values per node record.
    pub stride: usize,
}

impl NodeSchema {
    /// Resolves required node field offsets from the declared field list.
    /// Returns `None` if any required field is missing.
    pub fn resolve(fields: &[String]) -> Option<Self> {
        Some(Self {
            name: position(fields, "name")?,
            type_tag: position(fields, "type")?,
            edge_count: position(fields, "edge_count")?,
            stride: fields.len(),
        })
    }
}

/// Offsets of the edge fields, plus the record stride.
///
/// Edge contents are not interpreted by the current traversal; the
/// stride is still needed to keep the edge cursor aligned, and
/// `to_node` must resolve so an edge-following variant stays possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSchema {
    /// Offset of the `to_node` field (byte offset of the target node).
    pub to_node: usize,
    /// Number of values per edge record.
    pub stride: usize,
}

impl EdgeSchema {
    /// Resolves required edge field offsets from the declared field list.
    pub fn resolve(fields: &[String]) -> Option<Self> {
        Some(Self {
            to_node: position(fields, "to_node")?,
            stride: fields.len(),
        })
    }
}

fn position(fields: &[String], name: &str) -> Option<usize> {
    fields.iter().position(|f| f == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_v8_node_layout() {
        // Field order as emitted by Chrome's heap profiler.
        let node_fields = fields(&[
            "type",
            "name",
            "id",
            "self_size",
            "edge_count",
            "trace_node_id",
            "detachedness",
        ]);
        let schema = NodeSchema::resolve(&node_fields).unwrap();
        assert_eq!(schema.type_tag, 0);
        assert_eq!(schema.name, 1);
        assert_eq!(schema.edge_count, 4);
        assert_eq!(schema.stride, 7);
    }

    #[test]
    fn resolves_v8_edge_layout() {
        let edge_fields = fields(&["type", "name_or_index", "to_node"]);
        let schema = EdgeSchema::resolve(&edge_fields).unwrap();
        assert_eq!(schema.to_node, 2);
        assert_eq!(schema.stride, 3);
    }

    #[test]
    fn missing_required_field_fails() {
        let node_fields = fields(&["type", "name", "id"]);
        assert!(NodeSchema::resolve(&node_fields).is_none());

        let edge_fields = fields(&["type", "name_or_index"]);
        assert!(EdgeSchema::resolve(&edge_fields).is_none());
    }

    #[test]
    fn empty_field_list_fails() {
        assert!(NodeSchema::resolve(&[]).is_none());
        assert!(EdgeSchema::resolve(&[]).is_none());
    }
}
