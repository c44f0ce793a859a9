//! Error type raised by normalization.
//!
//! Every variant is raised synchronously at the point of detection and
//! propagates unmodified up the recursive-descent call chain; there is no
//! local recovery inside parsing. The syntax class (see
//! [`NormalizeError::is_syntax`]) is the only one the top-level entry point
//! may downgrade into the lenient raw-token fallback.

use thiserror::Error;

/// Describes the specific reason a normalization call failed.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A group ran out of input before any of its closing markers appeared.
    #[error("unbalanced group: no closing marker ({expected}) before end of input")]
    UnbalancedGroup {
        /// Comma-joined list of the closing markers that were expected.
        expected: String,
    },
    /// A fixed-arity node finished with the wrong number of children.
    #[error("{command} expected {expected} argument(s), got {found}")]
    ArityMismatch {
        /// Marker of the node that was being parsed or rendered.
        command: String,
        /// Maximum number of children the node admits.
        expected: usize,
        /// Number of children actually present.
        found: usize,
    },
    /// A mandatory argument was missing entirely.
    #[error("missing required argument after {command}")]
    MissingArgument {
        /// Marker of the node the argument belongs to.
        command: String,
    },
    /// A `\begin…\end` environment name outside the supported set.
    #[error("invalid environment: {name}, only cases, matrix, array supported")]
    InvalidEnvironment {
        /// The offending environment name.
        name: String,
    },
    /// A policy-option call named a marker not present in the registry.
    #[error("no node kind registered for marker: {marker}")]
    UnknownMarker {
        /// The unregistered marker.
        marker: String,
    },
    /// An external lookup table was not the expected key-value document.
    #[error("malformed mapping table at line {line}: {content}")]
    InvalidMappingFormat {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line itself.
        content: String,
    },
}

impl NormalizeError {
    /// Whether this error belongs to the syntax class that the lenient
    /// fallback (`ensure_valid_formula = false`) converts into a raw-token
    /// reconstruction. All other kinds always propagate.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedGroup { .. } | Self::ArityMismatch { .. } | Self::MissingArgument { .. }
        )
    }
}
