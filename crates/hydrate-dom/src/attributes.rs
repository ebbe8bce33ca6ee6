//! Element Attributes
//!
//! Namespaced attribute storage. A boolean `true` is stored as the empty
//! string; `false` means the attribute is not set at all.

/// Value passed when creating or setting an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
}

impl AttrValue {
    /// Stored form, `None` when the attribute should be absent
    fn into_stored(self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(true) => Some(String::new()),
            Self::Bool(false) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    /// Qualified name as set (e.g. `xlink:href`)
    pub name: String,
    pub local_name: String,
    pub namespace: Option<String>,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            namespace: None,
            value: value.into(),
        }
    }

    pub fn new_ns(namespace: &str, qualified_name: &str, value: impl Into<String>) -> Self {
        let local_name = qualified_name
            .split_once(':')
            .map_or(qualified_name, |(_, local)| local);
        Self {
            name: qualified_name.to_string(),
            local_name: local_name.to_string(),
            namespace: normalize_ns(namespace),
            value: value.into(),
        }
    }
}

/// The empty string namespace is the same as no namespace
fn normalize_ns(namespace: &str) -> Option<String> {
    if namespace.is_empty() { None } else { Some(namespace.to_string()) }
}

/// Ordered attribute collection
#[derive(Debug, Clone, Default)]
pub struct AttributeList {
    attributes: Vec<Attr>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }

    /// Get attribute value by qualified name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Get attribute value by namespace and local name
    pub fn get_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        let namespace = normalize_ns(namespace);
        self.attributes.iter()
            .find(|a| a.namespace == namespace && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn has_ns(&self, namespace: &str, local_name: &str) -> bool {
        self.get_ns(namespace, local_name).is_some()
    }

    /// Set an attribute without a namespace
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) {
        match value.into().into_stored() {
            Some(value) => self.insert(Attr::new(name, value)),
            None => self.remove(name),
        }
    }

    /// Set a namespaced attribute
    pub fn set_ns(&mut self, namespace: &str, qualified_name: &str, value: impl Into<AttrValue>) {
        match value.into().into_stored() {
            Some(value) => self.insert(Attr::new_ns(namespace, qualified_name, value)),
            None => {
                let attr = Attr::new_ns(namespace, qualified_name, "");
                self.attributes.retain(|a| {
                    !(a.namespace == attr.namespace && a.local_name == attr.local_name)
                });
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    fn insert(&mut self, attr: Attr) {
        for existing in self.attributes.iter_mut() {
            if existing.namespace == attr.namespace && existing.local_name == attr.local_name {
                *existing = attr;
                return;
            }
        }
        self.attributes.push(attr);
    }
}
