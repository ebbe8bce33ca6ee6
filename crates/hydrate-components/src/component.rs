//! Component model
//!
//! Live component records and the definition tree the renderer builds
//! around them. The flattener consumes both.

use indexmap::IndexMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Value of a declared state key
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// Key with a value (which may itself be `null`)
    Value(Value),
    /// Key that is declared but whose value is not transmitted
    Undefined,
}

impl StateValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined => None,
        }
    }
}

impl From<Value> for StateValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Reactive state mapping
///
/// A key missing from the map was never declared. A key mapped to
/// [`StateValue::Undefined`] is declared and the client still needs an
/// accessor for it. Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    entries: IndexMap<String, StateValue>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, keeping its position if it already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Declare a key without a value
    pub fn set_undefined(&mut self, key: impl Into<String>) {
        self.set(key, StateValue::Undefined);
    }

    /// Builder form of [`State::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of declared keys without a value, in key order
    pub fn undefined_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_undefined())
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, StateValue)> for State {
    fn from_iter<I: IntoIterator<Item = (K, StateValue)>>(iter: I) -> Self {
        let mut state = State::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}

// Undefined keys are written as `null` so the key name survives JSON.
impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, &value.as_value())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StateVisitor;

        impl<'de> Visitor<'de> for StateVisitor {
            type Value = State;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a state object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<State, A::Error> {
                let mut state = State {
                    entries: IndexMap::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    state.set(key, value);
                }
                Ok(state)
            }
        }

        deserializer.deserialize_map(StateVisitor)
    }
}

/// Custom event binding: `[eventType, targetMethod, isOnce, extraArgs]`
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent {
    pub event_type: String,
    pub target_method: String,
    pub once: bool,
    pub extra_args: Option<Vec<Value>>,
}

impl CustomEvent {
    pub fn new(event_type: impl Into<String>, target_method: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target_method: target_method.into(),
            once: false,
            extra_args: None,
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.extra_args = Some(args);
        self
    }
}

impl Serialize for CustomEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.event_type, &self.target_method, self.once, &self.extra_args).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CustomEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (event_type, target_method, once, extra_args) =
            <(String, String, bool, Option<Vec<Value>>)>::deserialize(deserializer)?;
        Ok(Self { event_type, target_method, once, extra_args })
    }
}

/// DOM event binding: `[eventType, targetMethod, elementId, extraArgs]`
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: String,
    pub target_method: String,
    pub element_id: String,
    pub extra_args: Option<Vec<Value>>,
}

impl DomEvent {
    pub fn new(
        event_type: impl Into<String>,
        target_method: impl Into<String>,
        element_id: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            target_method: target_method.into(),
            element_id: element_id.into(),
            extra_args: None,
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.extra_args = Some(args);
        self
    }
}

impl Serialize for DomEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.event_type, &self.target_method, &self.element_id, &self.extra_args)
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DomEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (event_type, target_method, element_id, extra_args) =
            <(String, String, String, Option<Vec<Value>>)>::deserialize(deserializer)?;
        Ok(Self { event_type, target_method, element_id, extra_args })
    }
}

/// Fields moved out of a [`Component`] when it is flattened
#[derive(Debug, Clone, PartialEq)]
pub struct Transient {
    pub type_name: String,
    pub state: Option<State>,
    pub input: Option<Value>,
    pub custom_events: Vec<CustomEvent>,
    pub scope: Option<String>,
}

/// Live component record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    type_name: Option<String>,
    state: Option<State>,
    input: Option<Value>,
    custom_events: Vec<CustomEvent>,
    scope: Option<String>,
    /// Other own fields; these become the `w` catch-all payload
    fields: Map<String, Value>,
}

impl Component {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Record without a type: a wrapper that is never emitted
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_custom_event(mut self, event: CustomEvent) -> Self {
        self.custom_events.push(event);
        self
    }

    /// Object custom events are bound to (usually the owning component's id)
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    pub fn custom_events(&self) -> &[CustomEvent] {
        &self.custom_events
    }

    /// Set an own field. `None` removes it; `Some(Value::Null)` keeps it.
    pub fn set_field(&mut self, key: impl Into<String>, value: Option<Value>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.fields.insert(key, value);
            }
            None => {
                self.fields.remove(&key);
            }
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Whether the record has at least one own field left
    pub fn has_props(&self) -> bool {
        !self.fields.is_empty()
    }

    /// True once the transient fields have been taken
    pub fn is_consumed(&self) -> bool {
        self.type_name.is_none()
    }

    /// Move the transient fields out of the record.
    ///
    /// All transient fields are cleared regardless of the result. Returns
    /// `None` for placeholders and for records that were already consumed.
    pub fn take_transient(&mut self) -> Option<Transient> {
        let type_name = self.type_name.take();
        let state = self.state.take();
        let input = self.input.take();
        let custom_events = std::mem::take(&mut self.custom_events);
        let scope = self.scope.take();

        let type_name = type_name.filter(|name| !name.is_empty())?;
        Some(Transient {
            type_name,
            state,
            input,
            custom_events,
            scope,
        })
    }
}

/// A node in the rendered component tree
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    /// Stable identifier, unique within the flattened scope
    pub id: String,
    /// `None` for a definition without an associated record
    pub component: Option<Component>,
    /// `None` means no children, or children already flattened
    children: Option<Vec<ComponentDef>>,
    pub dom_events: Vec<DomEvent>,
    pub bubbling_dom_events: Vec<String>,
    /// Ids of the DOM roots this component owns
    pub roots: Vec<String>,
}

impl ComponentDef {
    pub fn new(id: impl Into<String>, component: Component) -> Self {
        Self {
            id: id.into(),
            component: Some(component),
            children: None,
            dom_events: Vec::new(),
            bubbling_dom_events: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Non-component wrapper node; only its children are emitted
    pub fn wrapper(id: impl Into<String>) -> Self {
        Self::new(id, Component::placeholder())
    }

    /// Definition without any associated record
    pub fn detached(id: impl Into<String>) -> Self {
        Self {
            component: None,
            ..Self::wrapper(id)
        }
    }

    pub fn with_child(mut self, child: ComponentDef) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.roots.push(root_id.into());
        self
    }

    pub fn with_dom_event(mut self, event: DomEvent) -> Self {
        self.dom_events.push(event);
        self
    }

    pub fn with_bubbling_dom_event(mut self, event_type: impl Into<String>) -> Self {
        self.bubbling_dom_events.push(event_type.into());
        self
    }

    pub fn add_child(&mut self, child: ComponentDef) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    pub fn children(&self) -> Option<&[ComponentDef]> {
        self.children.as_deref()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ComponentDef>> {
        self.children.as_mut()
    }

    /// Detach the children, leaving the "no children" sentinel behind
    pub fn take_children(&mut self) -> Option<Vec<ComponentDef>> {
        self.children.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_transient_clears_record() {
        let mut component = Component::new("widget")
            .with_state(State::new().with("open", json!(true)))
            .with_input(json!({"label": "hi"}))
            .with_field("extra", json!(1));

        let transient = component.take_transient().unwrap();
        assert_eq!(transient.type_name, "widget");
        assert!(transient.state.is_some());

        assert!(component.is_consumed());
        assert!(component.state().is_none());
        assert!(component.input().is_none());
        // Own fields are not transient
        assert_eq!(component.field("extra"), Some(&json!(1)));
        assert!(component.take_transient().is_none());
    }

    #[test]
    fn test_empty_type_name_is_placeholder() {
        let mut component = Component::new("").with_input(json!(1));
        assert!(component.take_transient().is_none());
        assert!(component.input().is_none());
    }

    #[test]
    fn test_large_state_keeps_order() {
        const KEYS: usize = 50_000;

        let mut state: State = (0..KEYS)
            .map(|i| (format!("k{i}"), StateValue::Value(json!(i))))
            .collect();
        state.set("k0", json!("again"));
        state.remove("k1");

        assert_eq!(state.len(), KEYS - 1);
        assert_eq!(state.get("k0"), Some(&StateValue::Value(json!("again"))));
        let keys: Vec<_> = state.iter().map(|(k, _)| k).take(3).collect();
        assert_eq!(keys, ["k0", "k2", "k3"]);

        let decoded: State = serde_json::from_value(serde_json::to_value(&state).unwrap()).unwrap();
        assert_eq!(decoded.len(), KEYS - 1);
        assert_eq!(decoded.iter().next().map(|(k, _)| k), Some("k0"));
    }

    #[test]
    fn test_state_set_keeps_position() {
        let mut state = State::new().with("a", json!(1)).with("b", json!(2));
        state.set_undefined("a");

        let keys: Vec<_> = state.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(state.undefined_keys(), ["a"]);
    }

    #[test]
    fn test_state_serializes_undefined_as_null() {
        let state = State::new().with("a", json!(1)).with("b", StateValue::Undefined);
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"a":1,"b":null}"#);
    }

    #[test]
    fn test_null_field_counts_as_prop() {
        let mut component = Component::new("x");
        assert!(!component.has_props());
        component.set_field("selected", Some(Value::Null));
        assert!(component.has_props());
        component.set_field("selected", None);
        assert!(!component.has_props());
    }

    #[test]
    fn test_event_tuples() {
        let event = CustomEvent::new("change", "handleChange").once();
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!(["change", "handleChange", true, null])
        );

        let dom = DomEvent::new("click", "handleClick", "c1-button").with_args(vec![json!(3)]);
        let value = serde_json::to_value(&dom).unwrap();
        assert_eq!(value, json!(["click", "handleClick", "c1-button", [3]]));
        assert_eq!(serde_json::from_value::<DomEvent>(value).unwrap(), dom);
    }
}
