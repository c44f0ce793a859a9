//! Recursive-descent parser.
//!
//! The parser drives the lexical stream through the node registry. Inside
//! a group, dispatch is exact: the next token selects its registered kind,
//! or falls through to the raw pass-through leaf. In argument position the
//! next kind is not known from context, so dispatch scans the registry for
//! the first kind whose marker matches (generic parsing).
//!
//! "No match" is a normal negative result (`Ok(None)`), never an error;
//! only true syntax violations surface as [`NormalizeError`].

pub mod parse_node;

use crate::functions::{binary, decoration, group, monomial, oplike, scripts, sqrt};
use crate::lexer::TokenStream;
use crate::registry::{NodeKind, Registry};
use crate::types::{NormalizeError, Policy};
use parse_node::{GroupDelim, Node};

/// Parser state for one normalization call.
pub struct Parser<'a> {
    /// The lexical source being consumed.
    pub stream: TokenStream<'a>,
    registry: &'a Registry,
    /// The per-call normalization policy.
    pub policy: &'a Policy,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `stream` with the given registry and policy.
    pub fn new(stream: TokenStream<'a>, registry: &'a Registry, policy: &'a Policy) -> Self {
        Self {
            stream,
            registry,
            policy,
        }
    }

    /// Generic parsing: scan the registry for the first matching kind and
    /// parse one node. `Ok(None)` only at end of input.
    pub fn read_node(&mut self) -> Result<Option<Node>, NormalizeError> {
        match self.registry.matched_kind(&mut self.stream) {
            Some((kind, marker)) => self.parse_kind(kind, &marker),
            None => Ok(self.stream.read().map(Node::Raw)),
        }
    }

    /// Reads nodes until the next token is one of `closers`, leaving the
    /// stream positioned at the closer.
    pub fn read_until(&mut self, closers: &[&str]) -> Result<Vec<Node>, NormalizeError> {
        let mut children = Vec::new();
        loop {
            let Some(token) = self.stream.peek() else {
                return Err(NormalizeError::UnbalancedGroup {
                    expected: closers.join(","),
                });
            };
            if closers.contains(&token.as_str()) {
                return Ok(children);
            }
            let parsed = match self.registry.kind_for_marker(&token) {
                Some(kind) => self.parse_kind(kind, &token)?,
                None => self.stream.read().map(Node::Raw),
            };
            match parsed {
                Some(node) => children.push(node),
                None => {
                    // the kind declined its own marker; keep the token raw
                    if let Some(token) = self.stream.read() {
                        children.push(Node::Raw(token));
                    }
                }
            }
        }
    }

    pub(crate) fn parse_kind(
        &mut self,
        kind: NodeKind,
        marker: &str,
    ) -> Result<Option<Node>, NormalizeError> {
        match kind {
            NodeKind::Prime => scripts::parse_prime(self),
            NodeKind::Sqrt => sqrt::parse(self),
            NodeKind::Monomial => monomial::parse(self),
            NodeKind::Log => oplike::parse_log(self, marker),
            NodeKind::Angle => decoration::parse_angle(self),
            NodeKind::Sup => scripts::parse_sup(self),
            NodeKind::Sub => scripts::parse_sub(self),
            NodeKind::Vector => decoration::parse_vector(self, marker),
            NodeKind::Trig => oplike::parse_trig(self, marker),
            NodeKind::Rm => decoration::parse_rm(self),
            NodeKind::Circle => scripts::parse_circle(self),
            NodeKind::Overline => decoration::parse_overline(self),
            NodeKind::Frac => binary::parse_frac(self, marker),
            NodeKind::Stack => binary::parse_stack(self, marker),
            NodeKind::Complement => binary::parse_complement(self),
            NodeKind::Brace => group::parse_group(self, GroupDelim::Brace, false),
            NodeKind::Paren => group::parse_group(self, GroupDelim::Paren, false),
            NodeKind::Bracket => group::parse_group(self, GroupDelim::Bracket, false),
            NodeKind::BeginEnd => group::parse_environment(self),
            NodeKind::Abs => group::parse_abs(self),
        }
    }

    /// Generic parsing with a mandatory result.
    pub(crate) fn read_argument(&mut self, command: &str) -> Result<Node, NormalizeError> {
        self.read_node()?.ok_or_else(|| NormalizeError::MissingArgument {
            command: command.to_owned(),
        })
    }

    /// The uniform single-argument rule: one character when the next
    /// non-blank character is alphanumeric, otherwise one generically
    /// parsed node.
    pub(crate) fn read_arg_char(&mut self, command: &str) -> Result<Node, NormalizeError> {
        if self
            .stream
            .peek_one_char()
            .is_some_and(|c| c.is_alphanumeric())
        {
            match self.stream.read_one_char() {
                Some(ch) => Ok(Node::OneChar(ch)),
                None => Err(NormalizeError::MissingArgument {
                    command: command.to_owned(),
                }),
            }
        } else {
            self.read_argument(command)
        }
    }

    /// Single-argument rule for kinds whose one-character arguments keep
    /// their attached super/subscripts.
    pub(crate) fn read_arg_scripted(&mut self, command: &str) -> Result<Node, NormalizeError> {
        if self
            .stream
            .peek_one_char()
            .is_some_and(|c| c.is_alphanumeric())
        {
            self.read_scripted_char(command)
        } else {
            self.read_argument(command)
        }
    }

    /// Reads one character plus at most one superscript and one subscript,
    /// in either order.
    pub(crate) fn read_scripted_char(&mut self, command: &str) -> Result<Node, NormalizeError> {
        let Some(base) = self.stream.read_one_char() else {
            return Err(NormalizeError::MissingArgument {
                command: command.to_owned(),
            });
        };
        let mut scripts = Vec::new();
        let mut sup_taken = false;
        let mut sub_taken = false;
        for _ in 0..2 {
            if !sup_taken {
                if let Some(node) = scripts::parse_sup(self)? {
                    scripts.push(node);
                    sup_taken = true;
                    continue;
                }
            }
            if !sub_taken {
                if let Some(node) = scripts::parse_sub(self)? {
                    scripts.push(node);
                    sub_taken = true;
                }
            }
        }
        Ok(Node::CharScripts { base, scripts })
    }
}
