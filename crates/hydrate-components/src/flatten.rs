//! Tree Flattener
//!
//! Post-order walk of a component definition tree. Each component's
//! transient fields are moved out as it is visited, so a second walk over
//! the same tree emits nothing.

use crate::component::{ComponentDef, Transient};
use crate::envelope::{Envelope, Extra, FlattenedRecord};
use crate::interner::TypeInterner;

/// A definition whose children are still being flattened
struct Frame {
    parent: Option<(ComponentDef, Option<Transient>)>,
    children: std::vec::IntoIter<ComponentDef>,
}

/// Accumulates records and the type table for one envelope
#[derive(Debug, Default)]
pub struct Flattener {
    records: Vec<FlattenedRecord>,
    types: TypeInterner,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a sequence of sibling definitions, in order
    pub fn flatten(&mut self, defs: &mut [ComponentDef]) {
        for def in defs.iter_mut() {
            let transient = take_transient(def);
            // Children first, so every descendant precedes this record
            if let Some(children) = def.take_children() {
                self.flatten_owned(children);
            }
            self.emit(def, transient);
        }
    }

    /// Post-order walk over detached children with an explicit stack, so
    /// tree depth never turns into call depth.
    fn flatten_owned(&mut self, children: Vec<ComponentDef>) {
        let mut stack = vec![Frame {
            parent: None,
            children: children.into_iter(),
        }];

        loop {
            let next = match stack.last_mut() {
                Some(frame) => frame.children.next(),
                None => break,
            };

            match next {
                Some(mut def) => {
                    let transient = take_transient(&mut def);
                    match def.take_children() {
                        Some(grandchildren) => stack.push(Frame {
                            parent: Some((def, transient)),
                            children: grandchildren.into_iter(),
                        }),
                        None => self.emit(&mut def, transient),
                    }
                }
                None => {
                    // All children done; the parent is next in post-order
                    if let Some(Frame { parent: Some((mut def, transient)), .. }) = stack.pop() {
                        self.emit(&mut def, transient);
                    }
                }
            }
        }
    }

    fn emit(&mut self, def: &mut ComponentDef, transient: Option<Transient>) {
        let Some(mut transient) = transient else {
            tracing::trace!("Skipping non-component node {}", def.id);
            return;
        };

        let type_index = self.types.intern(&transient.type_name);
        let input = transient.input.take();
        let extra = compact(def, transient);

        tracing::trace!("Flattened component {} (type {})", def.id, type_index.0);
        self.records.push(FlattenedRecord {
            id: def.id.clone(),
            type_index,
            input,
            extra,
        });
    }

    /// Records emitted so far
    pub fn records(&self) -> &[FlattenedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish the build. `None` when no record was emitted.
    pub fn finish(self) -> Option<Envelope> {
        if self.records.is_empty() {
            return None;
        }
        Some(Envelope {
            records: self.records,
            types: self.types.into_types(),
        })
    }
}

fn take_transient(def: &mut ComponentDef) -> Option<Transient> {
    def.component.as_mut().and_then(|c| c.take_transient())
}

/// Build the sparse `extra` bag for one component
fn compact(def: &mut ComponentDef, transient: Transient) -> Extra {
    let Transient { state, custom_events, scope, .. } = transient;

    let fields = def
        .component
        .as_ref()
        .filter(|c| c.has_props())
        .map(|c| c.fields().clone());

    let undefined_state_keys = state
        .as_ref()
        .map(|s| s.undefined_keys())
        .and_then(non_empty);

    let custom_events = non_empty(custom_events);
    // Scope only matters to custom events
    let scope = custom_events.as_ref().and(scope);

    Extra {
        scope,
        dom_events: non_empty(std::mem::take(&mut def.dom_events)),
        bubbling_dom_events: non_empty(std::mem::take(&mut def.bubbling_dom_events)),
        custom_events,
        fields,
        state,
        roots: non_empty(std::mem::take(&mut def.roots)),
        undefined_state_keys,
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}
