//! Node registry: the mapping from a leading marker to the node kind that
//! consumes it.
//!
//! The table is built once per [`Registry`] from a fixed registration list.
//! A marker claimed twice is a configuration error and fails construction
//! outright; the table is also pinned collision-free by a test. Exact
//! lookup serves dispatch inside groups, first-match scanning serves
//! generic parsing in argument position, and the raw pass-through kind is
//! the fallback for everything unregistered.

use strum::Display;

use crate::lexer::{match_monomial, TokenStream};
use crate::namespace::KeyMap;

/// Pseudo-marker claimed by the monomial kind; never a literal token, the
/// kind matches through the stream's pattern interface instead.
pub const MONOMIAL_MARKER: &str = "monomial";

/// The node kinds a marker can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// `\prime` mark.
    Prime,
    /// `\sqrt`.
    Sqrt,
    /// Monomial leaf (pattern-matched, no literal marker).
    Monomial,
    /// Logarithm family: `\log`, `\lg`, `\ln`.
    Log,
    /// `\angle` marker.
    Angle,
    /// `^` superscript.
    Sup,
    /// `_` subscript.
    Sub,
    /// `\vec` / `\textbf` / `\boldsymbol`.
    Vector,
    /// Trigonometric/hyperbolic family, parameterized by marker.
    Trig,
    /// `\rm` block.
    Rm,
    /// `\circ` / `\degree` decoration.
    Circle,
    /// `\overline`.
    Overline,
    /// `\frac` / `\dfrac`.
    Frac,
    /// `\overset` / `\underset`.
    Stack,
    /// `\complement`.
    Complement,
    /// `{` brace group.
    Brace,
    /// `(` parenthesis group.
    Paren,
    /// `[` bracket group.
    Bracket,
    /// `\begin…\end` environment.
    BeginEnd,
    /// `\vert … \vert` absolute-value bars.
    Abs,
}

/// Markers of the trigonometric/hyperbolic family; all dispatch to
/// [`NodeKind::Trig`].
pub const TRIG_MARKERS: &[&str] = &[
    "\\sin", "\\cos", "\\tan", "\\csc", "\\sec", "\\cot", "\\arcsin", "\\arccos", "\\arctan",
    "\\arccsc", "\\arcsec", "\\arccot", "\\sinh", "\\cosh", "\\tanh", "\\csch", "\\sech",
    "\\coth", "\\arsinh", "\\arcosh", "\\artanh", "\\arccsch", "\\arcsech", "\\arccoth",
];

fn registrations() -> Vec<(&'static str, NodeKind)> {
    let mut table = vec![
        ("\\prime", NodeKind::Prime),
        ("\\sqrt", NodeKind::Sqrt),
        (MONOMIAL_MARKER, NodeKind::Monomial),
        ("\\log", NodeKind::Log),
        ("\\lg", NodeKind::Log),
        ("\\ln", NodeKind::Log),
        ("\\angle", NodeKind::Angle),
        ("^", NodeKind::Sup),
        ("_", NodeKind::Sub),
        ("\\vec", NodeKind::Vector),
        ("\\textbf", NodeKind::Vector),
        ("\\boldsymbol", NodeKind::Vector),
    ];
    table.extend(TRIG_MARKERS.iter().map(|&marker| (marker, NodeKind::Trig)));
    table.extend([
        ("\\rm", NodeKind::Rm),
        ("\\circ", NodeKind::Circle),
        ("\\degree", NodeKind::Circle),
        ("\\overline", NodeKind::Overline),
        ("\\frac", NodeKind::Frac),
        ("\\dfrac", NodeKind::Frac),
        ("\\overset", NodeKind::Stack),
        ("\\underset", NodeKind::Stack),
        ("\\complement", NodeKind::Complement),
        ("{", NodeKind::Brace),
        ("(", NodeKind::Paren),
        ("[", NodeKind::Bracket),
        ("\\begin", NodeKind::BeginEnd),
        ("\\vert", NodeKind::Abs),
    ]);
    table
}

/// The built registry: scan-ordered entries plus an exact-lookup index.
pub struct Registry {
    entries: Vec<(&'static str, NodeKind)>,
    index: KeyMap<&'static str, NodeKind>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Builds the registry from the static registration table.
    ///
    /// # Panics
    ///
    /// Panics when a marker is claimed by two registrations; the table is
    /// fixed at compile time, so this is a configuration error, not an
    /// input error.
    #[must_use]
    pub fn new() -> Self {
        let entries = registrations();
        let mut index = KeyMap::default();
        for &(marker, kind) in &entries {
            let previous = index.insert(marker, kind);
            assert!(
                previous.is_none(),
                "marker {marker} registered by two node kinds"
            );
        }
        Self { entries, index }
    }

    /// Exact lookup; `None` means the raw pass-through fallback.
    #[must_use]
    pub fn kind_for_marker(&self, marker: &str) -> Option<NodeKind> {
        self.index.get(marker).copied()
    }

    /// Whether `marker` is registered at all.
    #[must_use]
    pub fn contains(&self, marker: &str) -> bool {
        self.index.contains_key(marker)
    }

    /// Scans the registered kinds in order and returns the first whose
    /// marker matches the stream's next token; `None` means the raw
    /// fallback. Used when the next kind is not known from context.
    pub fn matched_kind(&self, stream: &mut TokenStream<'_>) -> Option<(NodeKind, String)> {
        let token = stream.peek();
        for &(marker, kind) in &self.entries {
            if kind == NodeKind::Monomial {
                if stream.peek_with_matcher(match_monomial).is_some() {
                    return Some((kind, MONOMIAL_MARKER.to_owned()));
                }
            } else if token.as_deref() == Some(marker) {
                return Some((kind, marker.to_owned()));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexOptions;
    use crate::mapping::TokenMappings;

    #[test]
    fn registration_table_is_collision_free() {
        let mut markers: Vec<&str> = registrations().iter().map(|&(m, _)| m).collect();
        let before = markers.len();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), before);
    }

    #[test]
    fn exact_lookup() {
        let registry = Registry::new();
        assert_eq!(registry.kind_for_marker("\\frac"), Some(NodeKind::Frac));
        assert_eq!(registry.kind_for_marker("\\dfrac"), Some(NodeKind::Frac));
        assert_eq!(registry.kind_for_marker("\\sinh"), Some(NodeKind::Trig));
        assert_eq!(registry.kind_for_marker("\\lg"), Some(NodeKind::Log));
        assert_eq!(registry.kind_for_marker("3x"), None);
    }

    #[test]
    fn scan_prefers_monomial_over_later_kinds() {
        let registry = Registry::new();
        let mappings = TokenMappings::default();
        let mut stream = TokenStream::new("3x + 1", LexOptions::default(), &mappings);
        let (kind, marker) = registry.matched_kind(&mut stream).unwrap();
        assert_eq!(kind, NodeKind::Monomial);
        assert_eq!(marker, MONOMIAL_MARKER);

        let mut stream = TokenStream::new("\\sin x", LexOptions::default(), &mappings);
        let (kind, marker) = registry.matched_kind(&mut stream).unwrap();
        assert_eq!(kind, NodeKind::Trig);
        assert_eq!(marker, "\\sin");

        let mut stream = TokenStream::new("= 1", LexOptions::default(), &mappings);
        assert_eq!(registry.matched_kind(&mut stream), None);
    }
}
