//! Shared context for normalization calls.

use crate::mapping::TokenMappings;
use crate::registry::Registry;

/// Everything a normalization call consults that outlives the call: the
/// node registry and the symbol lookup tables. Built once, immutable
/// afterwards, shareable between calls and threads.
pub struct NormContext {
    /// The marker-to-kind dispatch table.
    pub registry: Registry,
    /// Alias, case-folding and character substitution tables.
    pub mappings: TokenMappings,
}

impl Default for NormContext {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            mappings: TokenMappings::default(),
        }
    }
}

impl NormContext {
    /// Creates a context with the built-in tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
