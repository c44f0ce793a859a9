//! The logarithm and trigonometric/hyperbolic operator families.
//!
//! Both share the shape `name ⟨scripts⟩ (value)`; they differ in which
//! scripts they admit and which argument forms they accept. All
//! trigonometric and hyperbolic variants are one node kind parameterized
//! by marker.

use super::{binary, canonical_order, group, monomial, scripts, RenderCx};
use crate::lexer::GREEK_TOKENS;
use crate::parser::parse_node::{GroupDelim, Node};
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Parses a logarithm-family node. `\lg` and `\ln` forbid the subscript;
/// the superscript is probed both before and after it, so `\log^2_3` and
/// `\log_3^2` parse identically.
pub(crate) fn parse_log(
    parser: &mut Parser<'_>,
    marker: &str,
) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(marker) {
        return Ok(None);
    }
    parser.stream.read();
    let allow_sub = marker == "\\log";

    let mut children = Vec::new();
    let mut sup_seen = false;
    if let Some(sup) = scripts::parse_sup(parser)? {
        children.push(sup);
        sup_seen = true;
    }
    if allow_sub {
        if let Some(sub) = scripts::parse_sub(parser)? {
            children.push(sub);
        }
    }
    if !sup_seen {
        if let Some(sup) = scripts::parse_sup(parser)? {
            children.push(sup);
        }
    }

    children.push(parse_log_value(parser, marker)?);
    Ok(Some(Node::Log {
        command: marker.to_owned(),
        children,
    }))
}

/// The mandatory logarithm value: parenthesized group, brace group or
/// monomial. A parenthesized value directly followed by a superscript is
/// re-wrapped so the superscript applies to the whole expression.
fn parse_log_value(parser: &mut Parser<'_>, marker: &str) -> Result<Node, NormalizeError> {
    if let Some(paren) = group::parse_group_node(parser, GroupDelim::Paren, false)? {
        if let Some(sup) = scripts::parse_sup(parser)? {
            return Ok(Node::Seq(vec![Node::Group(paren), sup]));
        }
        return Ok(Node::Group(paren));
    }
    if let Some(brace) = group::parse_group(parser, GroupDelim::Brace, false)? {
        return Ok(brace);
    }
    if let Some(value) = monomial::parse(parser)? {
        return Ok(value);
    }
    Err(NormalizeError::MissingArgument {
        command: marker.to_owned(),
    })
}

/// Parses a trigonometric/hyperbolic node. While the strip-angle policy
/// option is active, `\angle` markers inside the argument are dropped at
/// lex time.
pub(crate) fn parse_trig(
    parser: &mut Parser<'_>,
    marker: &str,
) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(marker) {
        return Ok(None);
    }
    parser.stream.read();

    let strip = parser.policy.strip_angle;
    if strip {
        parser.stream.set_strip_angle(true);
    }
    let mut children = Vec::new();
    let sup = scripts::parse_sup(parser);
    let value = sup.and_then(|sup| {
        if let Some(sup) = sup {
            children.push(sup);
        }
        parse_trig_value(parser, marker)
    });
    if strip {
        parser.stream.set_strip_angle(false);
    }
    children.push(value?);

    Ok(Some(Node::Trig {
        command: marker.to_owned(),
        children,
    }))
}

/// The mandatory trigonometric value: parenthesized group, brace group,
/// monomial or fraction, else one generically parsed node. A fraction is
/// wrapped in a synthetic sequence, and a Greek token directly after it is
/// folded into the same argument (`\cos \pi x` parses as one argument).
fn parse_trig_value(parser: &mut Parser<'_>, marker: &str) -> Result<Node, NormalizeError> {
    if let Some(paren) = group::parse_group(parser, GroupDelim::Paren, false)? {
        return Ok(paren);
    }
    if let Some(brace) = group::parse_group(parser, GroupDelim::Brace, false)? {
        return Ok(brace);
    }
    if let Some(value) = monomial::parse(parser)? {
        return Ok(value);
    }
    if let Some(frac) = binary::parse_frac(parser, "\\frac")? {
        let mut seq = vec![frac];
        if parser
            .stream
            .peek()
            .is_some_and(|t| GREEK_TOKENS.contains(&t.as_str()))
        {
            if let Some(token) = parser.stream.read() {
                seq.push(Node::Raw(token));
            }
        }
        return Ok(Node::Seq(seq));
    }
    match parser.read_node()? {
        Some(node) => Ok(node),
        None => Err(NormalizeError::MissingArgument {
            command: marker.to_owned(),
        }),
    }
}

/// Renders a logarithm-family node.
pub(crate) fn render_log(
    command: &str,
    children: &[Node],
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    match children {
        [value] => Ok(format!("{command}({})", value.render(cx)?)),
        [script, value] => {
            if !cx.policy.brace_single_elem && is_bare_value(value) {
                Ok(format!("{command}{}{}", script.render(cx)?, value.render(cx)?))
            } else {
                Ok(format!(
                    "{command}{}({})",
                    script.render(cx)?,
                    value.render(cx)?
                ))
            }
        }
        [_, _, _] => {
            let ordered = canonical_order(children);
            Ok(format!(
                "{command}{}{}({})",
                ordered[0].render(cx)?,
                ordered[1].render(cx)?,
                ordered[2].render(cx)?
            ))
        }
        _ => Err(NormalizeError::ArityMismatch {
            command: command.to_owned(),
            expected: 3,
            found: children.len(),
        }),
    }
}

/// A value that may render without parentheses when the brace-single-elem
/// policy option is off: a bare token, a scripted character or a monomial,
/// possibly alone inside a group.
fn is_bare_value(value: &Node) -> bool {
    let inner = match value {
        Node::Group(group) => match group.children.as_slice() {
            [only] => only,
            _ => return false,
        },
        other => other,
    };
    matches!(
        inner,
        Node::Raw(_) | Node::CharScripts { .. } | Node::Monomial(_)
    )
}

/// Renders a trigonometric/hyperbolic node; the value is always
/// parenthesized.
pub(crate) fn render_trig(
    command: &str,
    children: &[Node],
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    match children {
        [value] => Ok(format!("{command}({})", value.render(cx)?)),
        [sup, value] => Ok(format!(
            "{command}{}({})",
            sup.render(cx)?,
            value.render(cx)?
        )),
        _ => Err(NormalizeError::ArityMismatch {
            command: command.to_owned(),
            expected: 2,
            found: children.len(),
        }),
    }
}
