//! Decoding of content-engine node descriptors.
//!
//! The engine describes one accessible node per query as a flag-and-field
//! bundle. [`NodeDescriptor::decode`] turns that bundle into a typed value
//! with documented defaults; it never fails, so a degraded engine answer can
//! at worst produce an empty-looking node, never a crash in the assistive
//! technology path.
//!
//! Descriptors are transient: the engine owns them and this layer re-fetches
//! on every projection rather than caching.

use bitflags::bitflags;

use crate::bundle::Bundle;
use crate::platform::Rect;

/// Identifier the engine uses for the conceptual root node.
pub const NO_ID: i32 = -1;

bitflags! {
    /// Boolean state flags of one node, as encoded by the engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u32 {
        const ACCESSIBILITY_FOCUSED = 1 << 0;
        const CHECKABLE = 1 << 1;
        const CHECKED = 1 << 2;
        const CLICKABLE = 1 << 3;
        const CONTENT_INVALID = 1 << 4;
        const CONTEXT_CLICKABLE = 1 << 5;
        const EDITABLE = 1 << 6;
        const ENABLED = 1 << 7;
        const FOCUSABLE = 1 << 8;
        const FOCUSED = 1 << 9;
        const LONG_CLICKABLE = 1 << 10;
        const MULTI_LINE = 1 << 11;
        const PASSWORD = 1 << 12;
        const SCROLLABLE = 1 << 13;
        const SELECTED = 1 << 14;
        const VISIBLE_TO_USER = 1 << 15;
        const SELECTABLE = 1 << 16;
    }
}

/// Value range of a slider/progress-like node.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeInfo {
    /// Engine-defined range kind (int, float, percent).
    pub kind: i32,
    /// Lower bound; negative infinity when unbounded.
    pub min: f64,
    /// Upper bound; positive infinity when unbounded.
    pub max: f64,
    /// Current value; 0 when unreported.
    pub current: f64,
}

impl RangeInfo {
    fn decode(bundle: &Bundle) -> Self {
        Self {
            kind: bundle.get_i32_or("type", 0),
            min: bundle.get_f64_or("min", f64::NEG_INFINITY),
            max: bundle.get_f64_or("max", f64::INFINITY),
            current: bundle.get_f64_or("current", 0.0),
        }
    }
}

/// Shape of a table/grid-like container node.
///
/// Numeric fields default to 0 when the engine omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub row_count: i32,
    pub column_count: i32,
    pub hierarchical: bool,
    pub selection_mode: i32,
}

impl CollectionInfo {
    fn decode(bundle: &Bundle) -> Self {
        Self {
            row_count: bundle.get_i32_or("rowCount", 0),
            column_count: bundle.get_i32_or("columnCount", 0),
            hierarchical: bundle.get_bool_or("isHierarchical", false),
            selection_mode: bundle.get_i32_or("selectionMode", 0),
        }
    }
}

/// Position of a node inside a collection.
///
/// Numeric fields default to 0 when the engine omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItemInfo {
    pub row_index: i32,
    pub row_span: i32,
    pub column_index: i32,
    pub column_span: i32,
}

impl CollectionItemInfo {
    fn decode(bundle: &Bundle) -> Self {
        Self {
            row_index: bundle.get_i32_or("rowIndex", 0),
            row_span: bundle.get_i32_or("rowSpan", 0),
            column_index: bundle.get_i32_or("columnIndex", 0),
            column_span: bundle.get_i32_or("columnSpan", 0),
        }
    }
}

/// One accessible node as described by the content engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    /// Stable per-node identifier; [`NO_ID`] denotes the conceptual root.
    pub id: i32,
    /// Parent identifier; [`NO_ID`] when absent.
    pub parent_id: i32,
    /// Child identifiers in document order.
    pub children: Vec<i32>,
    /// Boolean state flags.
    pub flags: NodeFlags,
    pub class_name: Option<String>,
    pub text: Option<String>,
    pub hint: Option<String>,
    /// Engine-internal role string, surfaced out-of-band to the platform.
    pub role: Option<String>,
    pub role_description: Option<String>,
    /// Raw input-type string; classification happens at projection time.
    pub input_type: Option<String>,
    /// Bounds in screen coordinates.
    pub bounds: Option<Rect>,
    pub range: Option<RangeInfo>,
    pub collection: Option<CollectionInfo>,
    pub collection_item: Option<CollectionItemInfo>,
}

impl NodeDescriptor {
    /// Decode a node descriptor from the engine's field bundle.
    ///
    /// Never fails: absent or malformed fields fall back to their documented
    /// defaults, and malformed substructures read as "not present".
    pub fn decode(info: &Bundle) -> Self {
        Self {
            id: info.get_i32_or("id", NO_ID),
            parent_id: info.get_i32_or("parentId", NO_ID),
            children: info.get_i32_array("children").unwrap_or_default(),
            flags: NodeFlags::from_bits_truncate(info.get_i32_or("flags", 0) as u32),
            class_name: info.get_str("className").map(str::to_string),
            text: info.get_str("text").map(str::to_string),
            hint: info.get_str("hint").map(str::to_string),
            role: info.get_str("role").map(str::to_string),
            role_description: info.get_str("roleDescription").map(str::to_string),
            input_type: info.get_str("inputType").map(str::to_string),
            bounds: info
                .get_i32_array("bounds")
                .filter(|b| b.len() == 4)
                .map(|b| Rect::new(b[0], b[1], b[2], b[3])),
            range: info.get_bundle("rangeInfo").map(|b| RangeInfo::decode(&b)),
            collection: info
                .get_bundle("collectionInfo")
                .map(|b| CollectionInfo::decode(&b)),
            collection_item: info
                .get_bundle("collectionItemInfo")
                .map(|b| CollectionItemInfo::decode(&b)),
        }
    }

    /// Check whether this descriptor denotes the conceptual root.
    pub fn is_root(&self) -> bool {
        self.id == NO_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_defaults() {
        let mut info = Bundle::new();
        info.put_i32("id", 42);
        info.put_i32("flags", 0);

        let d = NodeDescriptor::decode(&info);
        assert_eq!(d.id, 42);
        assert_eq!(d.parent_id, NO_ID);
        assert!(d.children.is_empty());
        assert_eq!(d.flags, NodeFlags::empty());
        assert_eq!(d.class_name, None);
        assert_eq!(d.text, None);
        assert_eq!(d.bounds, None);
        assert_eq!(d.range, None);
        assert_eq!(d.collection, None);
        assert_eq!(d.collection_item, None);
        assert!(!d.is_root());
    }

    #[test]
    fn test_decode_full() {
        let value = json!({
            "id": 7,
            "parentId": 3,
            "children": [8, 9, 10],
            "flags": (NodeFlags::CLICKABLE | NodeFlags::ENABLED).bits(),
            "className": "emberview.Button",
            "text": "Submit",
            "hint": "Submits the form",
            "role": "pushbutton",
            "roleDescription": "button",
            "inputType": "text",
            "bounds": [10, 20, 110, 60],
            "rangeInfo": { "type": 1, "min": 0.0, "max": 10.0, "current": 4.0 },
            "collectionInfo": { "rowCount": 2, "columnCount": 3, "isHierarchical": true, "selectionMode": 1 },
            "collectionItemInfo": { "rowIndex": 1, "rowSpan": 1, "columnIndex": 2, "columnSpan": 1 },
        });
        let d = NodeDescriptor::decode(&Bundle::from_value(&value).unwrap());

        assert_eq!(d.parent_id, 3);
        assert_eq!(d.children, vec![8, 9, 10]);
        assert!(d.flags.contains(NodeFlags::CLICKABLE | NodeFlags::ENABLED));
        assert_eq!(d.class_name.as_deref(), Some("emberview.Button"));
        assert_eq!(d.bounds, Some(Rect::new(10, 20, 110, 60)));
        assert_eq!(
            d.range,
            Some(RangeInfo { kind: 1, min: 0.0, max: 10.0, current: 4.0 })
        );
        assert_eq!(
            d.collection,
            Some(CollectionInfo {
                row_count: 2,
                column_count: 3,
                hierarchical: true,
                selection_mode: 1
            })
        );
        assert_eq!(
            d.collection_item,
            Some(CollectionItemInfo {
                row_index: 1,
                row_span: 1,
                column_index: 2,
                column_span: 1
            })
        );
    }

    #[test]
    fn test_range_defaults_are_unbounded() {
        let value = json!({ "id": 1, "rangeInfo": {} });
        let d = NodeDescriptor::decode(&Bundle::from_value(&value).unwrap());
        let range = d.range.unwrap();
        assert_eq!(range.kind, 0);
        assert_eq!(range.min, f64::NEG_INFINITY);
        assert_eq!(range.max, f64::INFINITY);
        assert_eq!(range.current, 0.0);
    }

    #[test]
    fn test_malformed_substructures_read_as_absent() {
        let value = json!({
            "id": 1,
            "bounds": [1, 2, 3],          // wrong arity
            "rangeInfo": "bogus",         // wrong type
            "collectionInfo": 12,
            "children": "not-an-array",
        });
        let d = NodeDescriptor::decode(&Bundle::from_value(&value).unwrap());
        assert_eq!(d.bounds, None);
        assert_eq!(d.range, None);
        assert_eq!(d.collection, None);
        assert!(d.children.is_empty());
    }

    #[test]
    fn test_root_sentinel() {
        let mut info = Bundle::new();
        info.put_i32("id", NO_ID);
        assert!(NodeDescriptor::decode(&info).is_root());

        // An empty bundle also decodes as the root: id defaults to NO_ID.
        assert!(NodeDescriptor::decode(&Bundle::new()).is_root());
    }

    #[test]
    fn test_unknown_flag_bits_are_dropped() {
        let mut info = Bundle::new();
        info.put_i32("id", 1);
        info.put_i32("flags", (1 << 17) | NodeFlags::CHECKED.bits() as i32);
        let d = NodeDescriptor::decode(&info);
        assert_eq!(d.flags, NodeFlags::CHECKED);
    }
}
