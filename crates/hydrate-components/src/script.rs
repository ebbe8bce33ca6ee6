//! Script Emitter
//!
//! Writes the envelope as an inline `<script>` that appends it to a
//! client-side list on `window` (`window.$components` by default).

use std::fmt::Write;

use hydrate_security::CspNonce;

use crate::context::RenderOutput;
use crate::envelope::Envelope;
use crate::payload::{build_envelope, EnvelopeScope};
use crate::HydrateError;

/// Escape `</` so the payload cannot close the surrounding script element
pub fn escape_script_payload(json: &str) -> String {
    json.replace("</", "\\u003C/")
}

/// Write `envelope` as an inline script element that appends it to
/// `window[registry_global]`
pub fn emit_inline_script<W: Write>(
    envelope: &Envelope,
    out: &mut W,
    nonce: Option<&CspNonce>,
    registry_global: &str,
) -> Result<(), HydrateError> {
    let payload = escape_script_payload(&envelope.to_json()?);
    let g = registry_global;

    out.write_str("<script")?;
    if let Some(nonce) = nonce {
        write!(out, " nonce={}", serde_json::to_string(nonce.as_str())?)?;
    }
    write!(
        out,
        ">(function(){{var w=window;w.{g}=(w.{g}||[]).concat({payload})||w.{g}}})()</script>"
    )?;
    Ok(())
}

/// Append the hydration script for `scope` to the render output.
/// Writes nothing when there are no components to report.
pub fn write_init_components_code(
    out: &mut RenderOutput,
    scope: EnvelopeScope,
) -> Result<(), HydrateError> {
    let Some(envelope) = build_envelope(out, scope) else {
        return Ok(());
    };

    let (buffer, global) = out.buffer_and_global();
    emit_inline_script(
        &envelope,
        buffer,
        global.csp_nonce.as_ref(),
        global.registry_global,
    )?;
    tracing::debug!("Wrote hydration script for {} components", envelope.records.len());
    Ok(())
}
