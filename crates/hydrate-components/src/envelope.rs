//! Envelope wire types
//!
//! ```text
//! { "w": [[id, typeIndex, input, extra], ...], "t": [typeName, ...] }
//! ```
//!
//! Records are in post-order: children always precede their parent.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::{CustomEvent, DomEvent, State};
use crate::interner::TypeIndex;
use crate::HydrateError;

/// Sparse per-record attribute bag. `None` keys are left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extra {
    /// Scope custom events are bound to; only sent with custom events
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(rename = "d", skip_serializing_if = "Option::is_none")]
    pub dom_events: Option<Vec<DomEvent>>,
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    pub bubbling_dom_events: Option<Vec<String>>,
    #[serde(rename = "e", skip_serializing_if = "Option::is_none")]
    pub custom_events: Option<Vec<CustomEvent>>,
    /// Remaining own fields of the component record
    #[serde(rename = "w", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub roots: Option<Vec<String>>,
    /// State keys sent as `null` that are really undefined
    #[serde(rename = "u", skip_serializing_if = "Option::is_none")]
    pub undefined_state_keys: Option<Vec<String>>,
}

impl Extra {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One flattened component: `[id, typeIndex, input, extra]`
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedRecord {
    pub id: String,
    pub type_index: TypeIndex,
    /// Written as `null` when absent
    pub input: Option<Value>,
    pub extra: Extra,
}

impl Serialize for FlattenedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.id, self.type_index, &self.input, &self.extra).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlattenedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (id, type_index, input, extra) =
            <(String, TypeIndex, Option<Value>, Extra)>::deserialize(deserializer)?;
        Ok(Self { id, type_index, input, extra })
    }
}

/// Hydration payload: flattened records plus the type table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "w")]
    pub records: Vec<FlattenedRecord>,
    #[serde(rename = "t")]
    pub types: Vec<String>,
}

impl Envelope {
    /// Type name of a record
    pub fn type_name(&self, record: &FlattenedRecord) -> Option<&str> {
        self.types.get(record.type_index.as_usize()).map(String::as_str)
    }

    /// Record by component id
    pub fn record(&self, id: &str) -> Option<&FlattenedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Compact JSON text (not yet escaped for inline markup)
    pub fn to_json(&self) -> Result<String, HydrateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// JSON value ready to hand to another transport
    pub fn to_value(&self) -> Result<Value, HydrateError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_extra_is_empty_object() {
        let record = FlattenedRecord {
            id: "c2".into(),
            type_index: TypeIndex(0),
            input: None,
            extra: Extra::default(),
        };
        assert_eq!(serde_json::to_value(&record).unwrap(), json!(["c2", 0, null, {}]));
    }

    #[test]
    fn test_extra_keys() {
        let extra = Extra {
            scope: Some("c0".into()),
            custom_events: Some(vec![CustomEvent::new("select", "onSelect")]),
            roots: Some(vec!["c1-root".into()]),
            undefined_state_keys: Some(vec!["b".into()]),
            ..Extra::default()
        };
        assert_eq!(
            serde_json::to_value(&extra).unwrap(),
            json!({
                "p": "c0",
                "e": [["select", "onSelect", false, null]],
                "r": ["c1-root"],
                "u": ["b"]
            })
        );
    }

    #[test]
    fn test_record_parses_back() {
        let value = json!(["c1", 1, {"x": 1}, {"s": {"open": true}}]);
        let record: FlattenedRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.id, "c1");
        assert_eq!(record.type_index, TypeIndex(1));
        assert_eq!(record.input, Some(json!({"x": 1})));
        assert!(record.extra.state.unwrap().contains_key("open"));
    }
}
