use std::rc::Rc;

use indexmap::IndexMap;

use crate::interpreter::value::{anchor::Anchor, core::Value};

/// The binding store of an interpreter instance.
///
/// A single flat mapping from name to binding; scalars, anchors, and
/// relational values share one namespace and re-binding a name silently
/// replaces the previous binding. Insertion order is preserved so that
/// `list anchors` reports anchors in declaration order. Nothing in the
/// language introduces a nested scope, so there is no scope stack here.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value under a name, replacing any previous binding.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Looks up a binding by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Iterates over all anchor bindings in insertion order.
    pub fn iter_anchors(&self) -> impl Iterator<Item = &Rc<Anchor>> {
        self.bindings.values().filter_map(|value| match value {
                                              Value::Anchor(anchor) => Some(anchor),
                                              _ => None,
                                          })
    }
}
