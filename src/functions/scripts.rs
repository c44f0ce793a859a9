//! Superscript, subscript, prime marks and the `\circ`/`\degree`
//! decoration.

use super::RenderCx;
use crate::parser::parse_node::{GroupDelim, Node};
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Parses a `^` superscript with its single argument.
pub(crate) fn parse_sup(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("^") {
        return Ok(None);
    }
    parser.stream.read();
    let arg = parser.read_arg_char("^")?;
    Ok(Some(Node::Sup(Box::new(arg))))
}

/// Parses a `_` subscript with its single argument.
pub(crate) fn parse_sub(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("_") {
        return Ok(None);
    }
    parser.stream.read();
    let arg = parser.read_arg_char("_")?;
    Ok(Some(Node::Sub(Box::new(arg))))
}

/// Parses a `\prime` mark.
pub(crate) fn parse_prime(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\prime") {
        return Ok(None);
    }
    parser.stream.read();
    Ok(Some(Node::Prime))
}

/// Parses a `\circ` / `\degree` token; the decoration supplies its own
/// `^{}` wrapper when rendered.
pub(crate) fn parse_circle(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    match parser.stream.peek().as_deref() {
        Some("\\circ" | "\\degree") => {}
        _ => return Ok(None),
    }
    let command = parser.stream.read().unwrap_or_default();
    Ok(Some(Node::Circle(command)))
}

/// Renders a superscript.
///
/// A run of prime marks collapses to `'` characters without the `^{}`
/// wrapper, and a circ/degree argument renders without an extra wrapper
/// because the decoration already supplies one.
pub(crate) fn render_sup(arg: &Node, cx: &RenderCx<'_>) -> Result<String, NormalizeError> {
    if let Some(command) = circle_argument(arg) {
        return Ok(format!("^{{{command}}}"));
    }
    if let Some(count) = prime_run(arg) {
        return Ok("'".repeat(count));
    }
    Ok(format!("^{{{}}}", arg.render(cx)?))
}

fn circle_argument(arg: &Node) -> Option<&str> {
    match arg {
        Node::Circle(command) => Some(command),
        Node::Group(group) if group.delim == GroupDelim::Brace => match group.children.as_slice() {
            [Node::Circle(command)] => Some(command),
            _ => None,
        },
        _ => None,
    }
}

fn prime_run(arg: &Node) -> Option<usize> {
    match arg {
        Node::Prime => Some(1),
        Node::Group(group)
            if group.delim == GroupDelim::Brace
                && group.children.iter().all(|c| matches!(c, Node::Prime)) =>
        {
            Some(group.children.len())
        }
        _ => None,
    }
}
