//! Payload Assembler
//!
//! Picks the components to report for a render and builds the envelope.

use crate::context::RenderOutput;
use crate::envelope::Envelope;

/// Which components an envelope covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeScope {
    /// Components finished by the current render
    #[default]
    Render,
    /// Every root in the cross-render registry
    AllTracked,
}

/// Build the envelope for `scope`.
///
/// `None` means there is nothing to send: no tracking context, or no
/// component records.
pub fn build_envelope(out: &mut RenderOutput, scope: EnvelopeScope) -> Option<Envelope> {
    match scope {
        EnvelopeScope::Render => out.data.components.as_mut()?.build_envelope(),
        EnvelopeScope::AllTracked => out.global.components.as_mut()?.build_envelope(),
    }
}

/// Envelope of every tracked component, for delivery outside of markup
/// (for example as the body of a data endpoint).
pub fn get_rendered_components(out: &mut RenderOutput) -> Option<Envelope> {
    build_envelope(out, EnvelopeScope::AllTracked)
}
