//! Syntax-node data types built by recursive descent.
//!
//! Every node owns its children outright; the tree is strict (no sharing,
//! no cycles) and immutable once built. The root of any parse is a
//! synthetic outer brace group wrapping the whole input.

/// Delimiter family of a grouping node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDelim {
    /// `{` … `}`; structural, rendered headless, parents re-brace.
    Brace,
    /// `[` … `]`.
    Bracket,
    /// `(` … `)`.
    Paren,
}

impl GroupDelim {
    /// The opening marker of this delimiter family.
    #[must_use]
    pub const fn open(self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::Bracket => "[",
            Self::Paren => "(",
        }
    }

    /// The matching closing marker, required in strict group parsing.
    #[must_use]
    pub const fn close(self) -> &'static str {
        match self {
            Self::Brace => "}",
            Self::Bracket => "]",
            Self::Paren => ")",
        }
    }
}

/// A grouping node. `close` records the closing token actually consumed,
/// which may differ from the family's own closer in lenient parsing
/// (`[4, +\infty)` keeps its `)`).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    /// Delimiter family of the opening marker.
    pub delim: GroupDelim,
    /// The closing token consumed from the stream.
    pub close: String,
    /// Child nodes in input order.
    pub children: Vec<Node>,
}

/// A `\begin…\end` environment. The begin and end name arguments are kept
/// separately and re-rendered as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvNode {
    /// Strict brace argument of `\begin`.
    pub name: GroupNode,
    /// Strict brace argument of `\end`.
    pub end_name: GroupNode,
    /// Everything between the two, including the column-spec group of an
    /// `array` and the `\\` row separators.
    pub body: Vec<Node>,
}

/// A typed syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw pass-through token.
    Raw(String),
    /// Single character consumed by the single-argument rule.
    OneChar(char),
    /// Single character with attached super/subscripts (at most one each).
    CharScripts {
        /// The character itself.
        base: char,
        /// Attached scripts in parse order.
        scripts: Vec<Node>,
    },
    /// A `\prime` mark.
    Prime,
    /// Brace, bracket or parenthesis group.
    Group(GroupNode),
    /// `\begin…\end` environment.
    Environment(EnvNode),
    /// `\vert … \vert` absolute-value bars.
    Abs(Vec<Node>),
    /// Square root with an optional bracketed radical index.
    Sqrt {
        /// The `[…]` radical index, when present.
        index: Option<GroupNode>,
        /// The mandatory radicand.
        radicand: Box<Node>,
    },
    /// Superscript.
    Sup(Box<Node>),
    /// Subscript.
    Sub(Box<Node>),
    /// `\vec` / `\textbf` / `\boldsymbol` / `\overline` style decoration.
    Decoration {
        /// The decorating command.
        command: String,
        /// The decorated argument.
        arg: Box<Node>,
    },
    /// Logarithm-family node (`\log`, `\lg`, `\ln`): optional scripts then
    /// the mandatory value, in parse order.
    Log {
        /// The command marker.
        command: String,
        /// Scripts followed by the value.
        children: Vec<Node>,
    },
    /// Trigonometric/hyperbolic-family node: optional leading superscript
    /// then the mandatory value.
    Trig {
        /// The command marker.
        command: String,
        /// Optional superscript followed by the value.
        children: Vec<Node>,
    },
    /// Monomial leaf: the matched text followed by attached scripts.
    Monomial(Vec<Node>),
    /// `\angle` marker with one argument.
    Angle(Box<Node>),
    /// `\rm` block with an optional brace argument.
    Rm(Option<GroupNode>),
    /// `\circ` / `\degree` decoration; renders with its own `^{}`.
    Circle(String),
    /// Fraction (`\frac`, `\dfrac`).
    Frac {
        /// The command marker.
        command: String,
        /// Numerator.
        num: Box<Node>,
        /// Denominator.
        den: Box<Node>,
    },
    /// `\overset` / `\underset`.
    Stack {
        /// The command marker.
        command: String,
        /// First argument (the stacked decoration).
        top: Box<Node>,
        /// Second argument (the base).
        base: Box<Node>,
    },
    /// `\complement` with an optional universal-set subscript.
    Complement {
        /// The `_{…}` universal set, when present.
        universe: Option<Box<Node>>,
        /// The mandatory argument.
        arg: Box<Node>,
    },
    /// Synthetic sibling sequence with no delimiters of its own.
    Seq(Vec<Node>),
}

impl Node {
    /// Whether this is the raw token `text`.
    #[must_use]
    pub fn is_raw(&self, text: &str) -> bool {
        matches!(self, Self::Raw(t) if t == text)
    }

    /// Whether this node renders attached to its left sibling, with no
    /// separating space.
    #[must_use]
    pub const fn attaches_left(&self) -> bool {
        matches!(self, Self::Sup(_) | Self::Sub(_) | Self::Circle(_))
    }
}
