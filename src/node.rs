//! Document adapter contract
//!
//! The engine never sees a concrete document type; it introspects nodes
//! through [`PathNode`]. An implementation for `serde_json::Value` is
//! bundled. With the `preserve_order` feature of `serde_json`, mapping key
//! order is the document order, which wildcards and filters observe.

use std::fmt;

/// The seven node kinds of a JSON/YAML-shaped tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
}

impl NodeKind {
    /// Whether nodes of this kind carry children
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Sequence | NodeKind::Mapping)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Int => "integer",
            NodeKind::Float => "float",
            NodeKind::String => "string",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// Read-only view of a document tree node
///
/// Contract: `kind` must be consistent with the accessors — a node reporting
/// [`NodeKind::String`] must return `Some` from [`as_str`](Self::as_str), and
/// likewise for the other scalar kinds. The engine reports violations as
/// adapter errors. Mappings iterate keys in document order; the engine keeps
/// its own parent chain during traversal, so no parent accessor is required.
pub trait PathNode: fmt::Debug {
    /// Kind of this node
    fn kind(&self) -> NodeKind;

    /// String scalar payload
    fn as_str(&self) -> Option<&str>;

    /// Boolean scalar payload
    fn as_bool(&self) -> Option<bool>;

    /// Integer scalar payload
    fn as_int(&self) -> Option<i64>;

    /// Float scalar payload
    fn as_float(&self) -> Option<f64>;

    /// Mapping keys in document order; empty for non-mappings
    fn mapping_keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Mapping value for `key`, if this node is a mapping containing it
    fn mapping_get(&self, key: &str) -> Option<&Self>;

    /// Number of mapping entries; 0 for non-mappings
    fn mapping_len(&self) -> usize;

    /// Sequence length; 0 for non-sequences
    fn sequence_len(&self) -> usize;

    /// Sequence element at `index`
    fn sequence_at(&self, index: usize) -> Option<&Self>;
}

impl PathNode for serde_json::Value {
    fn kind(&self) -> NodeKind {
        match self {
            serde_json::Value::Null => NodeKind::Null,
            serde_json::Value::Bool(_) => NodeKind::Bool,
            // Integers that do not fit i64 are treated as floats so that
            // `kind` and `as_int` stay consistent.
            serde_json::Value::Number(n) => {
                if n.as_i64().is_some() {
                    NodeKind::Int
                } else {
                    NodeKind::Float
                }
            }
            serde_json::Value::String(_) => NodeKind::String,
            serde_json::Value::Array(_) => NodeKind::Sequence,
            serde_json::Value::Object(_) => NodeKind::Mapping,
        }
    }

    fn as_str(&self) -> Option<&str> {
        self.as_str()
    }

    fn as_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn as_int(&self) -> Option<i64> {
        self.as_i64()
    }

    fn as_float(&self) -> Option<f64> {
        self.as_f64()
    }

    fn mapping_keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self.as_object() {
            Some(map) => Box::new(map.keys().map(String::as_str)),
            None => Box::new(std::iter::empty()),
        }
    }

    fn mapping_get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn mapping_len(&self) -> usize {
        self.as_object().map_or(0, serde_json::Map::len)
    }

    fn sequence_len(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn sequence_at(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|seq| seq.get(index))
    }
}
