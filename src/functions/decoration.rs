//! Decorations: `\vec`-style boldface commands, `\overline`, the `\rm`
//! block and the `\angle` marker.

use super::{group, RenderCx};
use crate::parser::parse_node::{GroupDelim, GroupNode, Node};
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Parses `\vec` / `\textbf` / `\boldsymbol`: a single character (keeping
/// its scripts) or one generically parsed argument.
pub(crate) fn parse_vector(
    parser: &mut Parser<'_>,
    marker: &str,
) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(marker) {
        return Ok(None);
    }
    parser.stream.read();
    let arg = parser.read_arg_scripted(marker)?;
    Ok(Some(Node::Decoration {
        command: marker.to_owned(),
        arg: Box::new(arg),
    }))
}

/// Parses `\overline`: a brace group or a scripted character; anything
/// else is a syntax error.
pub(crate) fn parse_overline(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\overline") {
        return Ok(None);
    }
    parser.stream.read();
    let arg = match group::parse_group(parser, GroupDelim::Brace, false)? {
        Some(brace) => brace,
        None => parser.read_scripted_char("\\overline")?,
    };
    Ok(Some(Node::Decoration {
        command: "\\overline".to_owned(),
        arg: Box::new(arg),
    }))
}

/// Parses `\rm` with its optional brace argument.
pub(crate) fn parse_rm(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\rm") {
        return Ok(None);
    }
    parser.stream.read();
    let arg = group::parse_group_node(parser, GroupDelim::Brace, false)?;
    Ok(Some(Node::Rm(arg)))
}

/// Parses `\angle` with one generically parsed argument.
pub(crate) fn parse_angle(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\angle") {
        return Ok(None);
    }
    parser.stream.read();
    let arg = parser.read_argument("\\angle")?;
    Ok(Some(Node::Angle(Box::new(arg))))
}

/// Renders an `\rm` block: the marker survives only under the keep-rm
/// policy option, and an argument-less block renders as the bare marker or
/// nothing at all.
pub(crate) fn render_rm(
    arg: Option<&GroupNode>,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    match arg {
        Some(arg) => {
            let value = group::render_group(arg, false, true, cx)?;
            if cx.policy.keep_rm {
                Ok(format!("\\rm {value}"))
            } else {
                Ok(value)
            }
        }
        None => {
            if cx.policy.keep_rm {
                Ok("\\rm".to_owned())
            } else {
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::functions::testing::{parse_and_render, parse_first, render_with};
    use crate::types::Policy;

    #[test]
    fn vector_family_braces_its_argument() {
        assert_eq!(parse_and_render(r"\vec a"), r"\vec{a}");
        assert_eq!(parse_and_render(r"\textbf a"), r"\textbf{a}");
        assert_eq!(parse_and_render(r"\boldsymbol a"), r"\boldsymbol{a}");
    }

    #[test]
    fn overline_takes_brace_or_char() {
        assert_eq!(parse_and_render(r"\overline{AB}"), r"\overline{AB}");
        assert_eq!(parse_and_render(r"\overline a"), r"\overline{a}");
    }

    #[test]
    fn angle_keeps_its_marker() {
        assert_eq!(parse_and_render(r"\angle AB"), r"\angle AB");
        assert_eq!(parse_and_render(r"\angle A"), r"\angle A");
    }

    #[test]
    fn rm_retention_follows_policy() {
        let without_rm = Policy {
            keep_rm: false,
            ..Policy::default()
        };
        let node = parse_first(r"\rm{kg}");
        assert_eq!(render_with(&node, &without_rm), "kg");
        assert_eq!(render_with(&node, &Policy::default()), r"\rm kg");

        let node = parse_first(r"\rm kg");
        assert_eq!(render_with(&node, &without_rm), "");
        assert_eq!(render_with(&node, &Policy::default()), r"\rm");
    }
}
