//! Envelope decoder
//!
//! The receiving half of the wire contract: resolves type indices and
//! restores undefined state keys, giving back one component per record in
//! envelope order.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::component::{CustomEvent, DomEvent, State};
use crate::envelope::Envelope;

/// Decoding error
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record {id} has type index {index}, but the type table has {len} entries")]
    TypeIndexOutOfRange { id: String, index: u32, len: usize },

    #[error("Duplicate component id: {0}")]
    DuplicateId(String),

    #[error("Script does not contain a component payload")]
    MissingPayload,
}

/// A component as the client sees it after decoding
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedComponent {
    pub id: String,
    pub type_name: String,
    pub input: Option<Value>,
    pub scope: Option<String>,
    pub dom_events: Vec<DomEvent>,
    pub bubbling_dom_events: Vec<String>,
    pub custom_events: Vec<CustomEvent>,
    pub fields: Map<String, Value>,
    pub state: Option<State>,
    pub roots: Vec<String>,
}

impl Envelope {
    /// Parse a JSON payload
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve every record against the type table
    pub fn decode(&self) -> Result<Vec<DecodedComponent>, DecodeError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        let mut components = Vec::with_capacity(self.records.len());

        for record in &self.records {
            let type_name = self.type_name(record).ok_or_else(|| DecodeError::TypeIndexOutOfRange {
                id: record.id.clone(),
                index: record.type_index.0,
                len: self.types.len(),
            })?;

            if !seen.insert(record.id.as_str()) {
                return Err(DecodeError::DuplicateId(record.id.clone()));
            }

            let extra = record.extra.clone();
            let mut state = extra.state;
            // `null` on the wire; the key is declared but has no value
            for key in extra.undefined_state_keys.into_iter().flatten() {
                state.get_or_insert_with(State::new).set_undefined(key);
            }

            components.push(DecodedComponent {
                id: record.id.clone(),
                type_name: type_name.to_string(),
                input: record.input.clone(),
                scope: extra.scope,
                dom_events: extra.dom_events.unwrap_or_default(),
                bubbling_dom_events: extra.bubbling_dom_events.unwrap_or_default(),
                custom_events: extra.custom_events.unwrap_or_default(),
                fields: extra.fields.unwrap_or_default(),
                state,
                roots: extra.roots.unwrap_or_default(),
            });
        }

        tracing::debug!("Decoded {} components", components.len());
        Ok(components)
    }
}

/// Extract the envelope from a script element written by
/// [`emit_inline_script`](crate::emit_inline_script) for the same
/// `registry_global`.
///
/// The `</` escape is an ordinary JSON string escape, so the payload
/// parses as-is.
pub fn parse_inline_script(script: &str, registry_global: &str) -> Result<Envelope, DecodeError> {
    let open = format!("(w.{registry_global}||[]).concat(");
    let close = format!(")||w.{registry_global}}})()");

    let start = script.find(&open).ok_or(DecodeError::MissingPayload)? + open.len();
    let end = script.rfind(&close).ok_or(DecodeError::MissingPayload)?;
    if end < start {
        return Err(DecodeError::MissingPayload);
    }
    Envelope::from_json(&script[start..end])
}
