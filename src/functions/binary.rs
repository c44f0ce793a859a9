//! Binary nodes: fractions, `\overset`/`\underset` and `\complement`.

use super::{scripts, RenderCx};
use crate::parser::parse_node::Node;
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Parses a fraction; both arguments follow the single-character-or-generic
/// rule, so `\frac12` and `\frac{1}{2}` parse identically.
pub(crate) fn parse_frac(
    parser: &mut Parser<'_>,
    marker: &str,
) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(marker) {
        return Ok(None);
    }
    parser.stream.read();
    let num = parser.read_arg_scripted(marker)?;
    let den = parser.read_arg_scripted(marker)?;
    Ok(Some(Node::Frac {
        command: marker.to_owned(),
        num: Box::new(num),
        den: Box::new(den),
    }))
}

/// Parses `\overset` / `\underset`, two arguments like a fraction.
pub(crate) fn parse_stack(
    parser: &mut Parser<'_>,
    marker: &str,
) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(marker) {
        return Ok(None);
    }
    parser.stream.read();
    let top = parser.read_arg_scripted(marker)?;
    let base = parser.read_arg_scripted(marker)?;
    Ok(Some(Node::Stack {
        command: marker.to_owned(),
        top: Box::new(top),
        base: Box::new(base),
    }))
}

/// Parses `\complement`: an optional universal-set subscript, then one
/// mandatory argument.
pub(crate) fn parse_complement(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\complement") {
        return Ok(None);
    }
    parser.stream.read();
    let universe = scripts::parse_sub(parser)?;
    let arg = parser.read_argument("\\complement")?;
    Ok(Some(Node::Complement {
        universe: universe.map(Box::new),
        arg: Box::new(arg),
    }))
}

pub(crate) fn render_complement(
    universe: Option<&Node>,
    arg: &Node,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    let arg = arg.render(cx)?;
    match universe {
        Some(universe) => Ok(format!("\\complement{}{{{arg}}}", universe.render(cx)?)),
        None => Ok(format!("\\complement{{{arg}}}")),
    }
}
