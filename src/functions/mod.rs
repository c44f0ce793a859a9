//! Per-kind parse and render implementations, plus the sibling merge
//! policy that joins rendered nodes back into canonical text.

pub(crate) mod binary;
pub(crate) mod decoration;
pub(crate) mod group;
pub(crate) mod monomial;
pub(crate) mod oplike;
pub(crate) mod scripts;
pub(crate) mod sqrt;

use crate::parser::parse_node::{GroupDelim, Node};
use crate::types::{NormalizeError, Policy};

/// Context threaded through rendering.
pub(crate) struct RenderCx<'a> {
    /// The per-call normalization policy.
    pub policy: &'a Policy,
}

impl Node {
    /// Renders this node on its own, without sibling spacing.
    pub(crate) fn render(&self, cx: &RenderCx<'_>) -> Result<String, NormalizeError> {
        match self {
            Self::Raw(token) => Ok(token.clone()),
            Self::OneChar(ch) => Ok(ch.to_string()),
            Self::CharScripts { base, scripts } => {
                Ok(format!("{base}{}", merge_siblings(scripts, true, cx)?))
            }
            Self::Prime => Ok("\\prime".to_owned()),
            Self::Group(group) => group::render_group(group, false, true, cx),
            Self::Environment(env) => group::render_environment(env, cx),
            Self::Abs(children) => group::render_abs(children, cx),
            Self::Sqrt { index, radicand } => sqrt::render(index.as_ref(), radicand, cx),
            Self::Sup(arg) => scripts::render_sup(arg, cx),
            Self::Sub(arg) => Ok(format!("_{{{}}}", arg.render(cx)?)),
            Self::Decoration { command, arg } => Ok(format!("{command}{{{}}}", arg.render(cx)?)),
            Self::Log { command, children } => oplike::render_log(command, children, cx),
            Self::Trig { command, children } => oplike::render_trig(command, children, cx),
            Self::Monomial(children) => monomial::render(children, cx),
            Self::Angle(arg) => Ok(format!("\\angle {}", arg.render(cx)?)),
            Self::Rm(arg) => decoration::render_rm(arg.as_ref(), cx),
            Self::Circle(command) => Ok(format!("^{{{command}}}")),
            Self::Frac { command, num, den } => {
                Ok(format!("{command}{{{}}}{{{}}}", num.render(cx)?, den.render(cx)?))
            }
            Self::Stack { command, top, base } => {
                Ok(format!("{command}{{{}}}{{{}}}", top.render(cx)?, base.render(cx)?))
            }
            Self::Complement { universe, arg } => binary::render_complement(universe.as_deref(), arg, cx),
            Self::Seq(children) => merge_siblings(children, true, cx),
        }
    }
}

/// Reorders a sibling sequence into canonical script order: a superscript
/// immediately followed by a subscript swaps with it.
pub(crate) fn canonical_order(nodes: &[Node]) -> Vec<&Node> {
    let mut ordered: Vec<&Node> = nodes.iter().collect();
    let mut idx = 0;
    while idx + 1 < ordered.len() {
        if matches!(ordered[idx], Node::Sup(_)) && matches!(ordered[idx + 1], Node::Sub(_)) {
            ordered.swap(idx, idx + 1);
            idx += 1;
        }
        idx += 1;
    }
    ordered
}

/// Joins sibling renderings under the merge policy: canonical script
/// order, a single space between nodes except before left-attaching ones,
/// headless brace groups (parents re-brace structurally), and recursive
/// outermost-brace stripping for a lone brace child when the caller opted
/// out of keeping successive outer braces.
pub(crate) fn merge_siblings(
    nodes: &[Node],
    keep_outmost: bool,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    if nodes.is_empty() {
        return Ok(String::new());
    }
    let ordered = canonical_order(nodes);
    let mut out = String::new();
    for (idx, node) in ordered.iter().enumerate() {
        if idx > 0 && !node.attaches_left() {
            out.push(' ');
        }
        let piece = match node {
            Node::Group(group) if group.delim == GroupDelim::Brace => {
                let strip_into = !keep_outmost && ordered.len() == 1;
                group::render_group(group, false, !strip_into, cx)?
            }
            Node::Group(group) => group::render_group(group, true, true, cx)?,
            other => other.render(cx)?,
        };
        out.push_str(&piece);
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared helpers for the per-kind unit tests.

    use super::RenderCx;
    use crate::context::NormContext;
    use crate::lexer::{LexOptions, TokenStream};
    use crate::parser::parse_node::Node;
    use crate::parser::Parser;
    use crate::types::Policy;

    /// Parses the first node of `input` with generic dispatch under the
    /// default policy and renders it.
    pub(crate) fn parse_and_render(input: &str) -> String {
        with_parser(input, Policy::default(), |parser| {
            let node = parser
                .read_node()
                .expect("parse failed")
                .expect("no node parsed");
            render(&node)
        })
    }

    /// Parses the first node of `input` with generic dispatch.
    pub(crate) fn parse_first(input: &str) -> Node {
        with_parser(input, Policy::default(), |parser| {
            parser
                .read_node()
                .expect("parse failed")
                .expect("no node parsed")
        })
    }

    /// Renders a node under the default policy.
    pub(crate) fn render(node: &Node) -> String {
        render_with(node, &Policy::default())
    }

    /// Renders a node under the given policy.
    pub(crate) fn render_with(node: &Node, policy: &Policy) -> String {
        node.render(&RenderCx { policy }).expect("render failed")
    }

    /// Runs `body` with a parser over `input`.
    pub(crate) fn with_parser<T>(
        input: &str,
        policy: Policy,
        body: impl FnOnce(&mut Parser<'_>) -> T,
    ) -> T {
        let ctx = NormContext::default();
        let stream = TokenStream::new(input, LexOptions::default(), &ctx.mappings);
        let mut parser = Parser::new(stream, &ctx.registry, &policy);
        body(&mut parser)
    }
}
