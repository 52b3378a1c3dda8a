//! Name-to-function transformer registry.
//!
//! Mapping tables reference transformers by name; the registry is the only
//! place those names bind to executable code. It is built once at startup
//! and treated as read-only for the process lifetime.

use std::collections::BTreeMap;

use crate::transforms::{self, TransformInput, TransformOutput};

/// Signature shared by every registered transformer.
pub type TransformFn = fn(&TransformInput<'_>) -> TransformOutput;

/// Registry of named transformers.
#[derive(Debug, Clone)]
pub struct TransformerRegistry {
    transformers: BTreeMap<String, TransformFn>,
}

impl TransformerRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            transformers: BTreeMap::new(),
        }
    }

    /// Create a registry holding all built-in transformers.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("date_mmddyyyy", transforms::date_mmddyyyy);
        registry.register("capitalize_first", transforms::capitalize_first);
        registry.register("uppercase", transforms::uppercase);
        registry.register("digits_only", transforms::digits_only);
        registry.register("ssn_dashed", transforms::ssn_dashed);
        registry.register("currency_whole", transforms::currency_whole);
        registry.register("checkmark", transforms::checkmark);
        registry.register("yes_no", transforms::yes_no);
        registry.register("phone_paren", transforms::phone_paren);
        registry.register("split_digit_groups", transforms::split_digit_groups);
        registry.register("one_hot", transforms::one_hot);
        registry.register("append_companion", transforms::append_companion);
        registry
    }

    /// Register a transformer under a name, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, transformer: TransformFn) {
        self.transformers.insert(name.into(), transformer);
    }

    /// Look up a transformer by name.
    pub fn get(&self, name: &str) -> Option<TransformFn> {
        self.transformers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.transformers.keys().map(String::as_str).collect()
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
