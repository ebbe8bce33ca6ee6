//! Example: render a small component tree and print its hydration script

use hydrate_components::{
    write_init_components_code, Component, ComponentDef, CustomEvent, EnvelopeScope,
    HydrateConfig, RenderOutput, State, StateValue,
};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = HydrateConfig::from_csp_header("script-src 'self' 'nonce-ZGVtbw=='")?;
    let mut out = RenderOutput::with_config(&config);
    out.write("<div id=\"c1-root\"><button id=\"c2-root\">Save</button></div>");

    let ctx = out.components();
    ctx.begin_component(
        ComponentDef::new(
            "c1",
            Component::new("editor")
                .with_state(
                    State::new()
                        .with("dirty", json!(false))
                        .with("draft", StateValue::Undefined),
                )
                .with_input(json!({"title": "</script> is escaped"})),
        )
        .with_root("c1-root"),
    );
    ctx.add_component(
        ComponentDef::new(
            "c2",
            Component::new("save-button")
                .with_scope("c1")
                .with_custom_event(CustomEvent::new("save", "handleSave")),
        )
        .with_root("c2-root"),
    );
    ctx.end_component();

    write_init_components_code(&mut out, EnvelopeScope::Render)?;

    println!("hydrate-components v{}", hydrate_components::VERSION);
    println!("{}", out.as_str());
    Ok(())
}
