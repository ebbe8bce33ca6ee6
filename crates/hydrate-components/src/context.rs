//! Render contexts
//!
//! Where the renderer records component definitions while it renders, and
//! the output stream the hydration script is written to.

use std::fmt;

use hydrate_security::CspNonce;

use crate::component::ComponentDef;
use crate::config::{HydrateConfig, DEFAULT_REGISTRY_GLOBAL};
use crate::envelope::Envelope;
use crate::flatten::Flattener;

/// Id of the synthetic definition at the bottom of every component stack
pub const ROOT_DEF_ID: &str = "";

/// Per-render tracking context
///
/// `stack[0]` is a synthetic root whose children are the render's
/// top-level components.
#[derive(Debug)]
pub struct ComponentsContext {
    stack: Vec<ComponentDef>,
}

impl ComponentsContext {
    pub fn new() -> Self {
        Self {
            stack: vec![ComponentDef::detached(ROOT_DEF_ID)],
        }
    }

    /// Start rendering a component; it becomes the current definition
    pub fn begin_component(&mut self, def: ComponentDef) {
        self.stack.push(def);
    }

    /// Finish the current component and attach it to its parent.
    /// Returns `false` if no component is open.
    pub fn end_component(&mut self) -> bool {
        if self.stack.len() <= 1 {
            tracing::warn!("end_component called with no open component");
            return false;
        }
        if let Some(def) = self.stack.pop() {
            self.current_mut().add_child(def);
        }
        true
    }

    /// Record a component with no children of its own
    pub fn add_component(&mut self, def: ComponentDef) {
        self.current_mut().add_child(def);
    }

    /// Definition currently being rendered (the root if none is open)
    pub fn current_mut(&mut self) -> &mut ComponentDef {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    /// Number of open components
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Top-level components finished so far
    pub fn root_children(&self) -> Option<&[ComponentDef]> {
        self.stack[0].children()
    }

    /// Flatten the finished top-level components.
    ///
    /// The root's children are detached for good, so components finished
    /// later go into the next envelope.
    pub fn build_envelope(&mut self) -> Option<Envelope> {
        let mut defs = self.stack[0].take_children()?;

        let mut flattener = Flattener::new();
        flattener.flatten(&mut defs);
        let envelope = flattener.finish();

        log_envelope("render", envelope.as_ref());
        envelope
    }
}

impl Default for ComponentsContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-render registry of mounted roots
#[derive(Debug, Default)]
pub struct GlobalComponentsContext {
    roots: Vec<ComponentDef>,
}

impl GlobalComponentsContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a root definition
    pub fn track_root(&mut self, root: ComponentDef) {
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[ComponentDef] {
        &self.roots
    }

    /// Flatten the children of every tracked root, in root order.
    /// Roots stay tracked; only their descendants are consumed.
    pub fn build_envelope(&mut self) -> Option<Envelope> {
        let mut flattener = Flattener::new();
        for root in self.roots.iter_mut() {
            if let Some(children) = root.children_mut() {
                flattener.flatten(children);
            }
        }
        let envelope = flattener.finish();

        log_envelope("all tracked roots", envelope.as_ref());
        envelope
    }
}

fn log_envelope(scope: &str, envelope: Option<&Envelope>) {
    match envelope {
        Some(e) => tracing::debug!(
            "Built envelope for {}: {} components, {} types",
            scope,
            e.records.len(),
            e.types.len()
        ),
        None => tracing::debug!("No components to serialize for {}", scope),
    }
}

/// Data scoped to one render
#[derive(Debug, Default)]
pub struct RenderData {
    pub components: Option<ComponentsContext>,
}

/// Data shared by every render of a response
#[derive(Debug)]
pub struct GlobalData {
    pub components: Option<GlobalComponentsContext>,
    pub csp_nonce: Option<CspNonce>,
    pub registry_global: &'static str,
}

impl Default for GlobalData {
    fn default() -> Self {
        Self {
            components: None,
            csp_nonce: None,
            registry_global: DEFAULT_REGISTRY_GLOBAL,
        }
    }
}

/// Streaming render output
#[derive(Debug, Default)]
pub struct RenderOutput {
    buffer: String,
    pub data: RenderData,
    pub global: GlobalData,
}

impl RenderOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &HydrateConfig) -> Self {
        Self {
            global: GlobalData {
                components: None,
                csp_nonce: config.csp_nonce.clone(),
                registry_global: config.registry_global,
            },
            ..Self::default()
        }
    }

    /// Per-render context, created on first use
    pub fn components(&mut self) -> &mut ComponentsContext {
        self.data.components.get_or_insert_with(ComponentsContext::new)
    }

    /// Cross-render registry, created on first use
    pub fn global_components(&mut self) -> &mut GlobalComponentsContext {
        self.global.components.get_or_insert_with(GlobalComponentsContext::new)
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Split borrow used by the script emitter
    pub(crate) fn buffer_and_global(&mut self) -> (&mut String, &GlobalData) {
        (&mut self.buffer, &self.global)
    }
}

impl fmt::Write for RenderOutput {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}
