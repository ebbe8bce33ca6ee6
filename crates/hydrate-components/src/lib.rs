//! Hydrate Components
//!
//! Hydration payload encoder for server-rendered components.
//!
//! After a render, the component tree is flattened (children before
//! parents) into a compact envelope that the browser runtime uses to wake
//! each component up without re-sending markup.
//!
//! # Example
//! ```rust
//! use hydrate_components::{Component, ComponentDef, EnvelopeScope, RenderOutput, State};
//! use serde_json::json;
//!
//! let mut out = RenderOutput::new();
//! let ctx = out.components();
//! ctx.begin_component(ComponentDef::new(
//!     "c1",
//!     Component::new("widget").with_state(State::new().with("open", json!(true))),
//! ));
//! ctx.add_component(ComponentDef::new("c2", Component::new("icon")));
//! ctx.end_component();
//!
//! hydrate_components::write_init_components_code(&mut out, EnvelopeScope::Render)?;
//! assert!(out.as_str().starts_with("<script>"));
//! # Ok::<(), hydrate_components::HydrateError>(())
//! ```

mod component;
mod config;
mod context;
mod decode;
mod envelope;
mod flatten;
mod interner;
mod payload;
mod registry;
mod script;

pub use component::{Component, ComponentDef, CustomEvent, DomEvent, State, StateValue, Transient};
pub use config::{HydrateConfig, DEFAULT_REGISTRY_GLOBAL};
pub use context::{
    ComponentsContext, GlobalComponentsContext, GlobalData, RenderData, RenderOutput, ROOT_DEF_ID,
};
pub use decode::{parse_inline_script, DecodeError, DecodedComponent};
pub use envelope::{Envelope, Extra, FlattenedRecord};
pub use flatten::Flattener;
pub use interner::{TypeIndex, TypeInterner};
pub use payload::{build_envelope, get_rendered_components, EnvelopeScope};
pub use registry::{define_component, register_component};
pub use script::{emit_inline_script, escape_script_payload, write_init_components_code};

pub use hydrate_security::CspNonce;

/// Error writing a hydration payload
#[derive(Debug, thiserror::Error)]
pub enum HydrateError {
    #[error("Failed to serialize envelope: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write to render output")]
    Write(#[from] std::fmt::Error),
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
