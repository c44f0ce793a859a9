//! Square root: optional bracketed radical index, then the radicand.

use super::{group, RenderCx};
use crate::parser::parse_node::{GroupDelim, GroupNode, Node};
use crate::parser::Parser;
use crate::types::NormalizeError;

pub(crate) fn parse(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\sqrt") {
        return Ok(None);
    }
    parser.stream.read();
    let index = group::parse_group_node(parser, GroupDelim::Bracket, false)?;
    let radicand = parser.read_arg_char("\\sqrt")?;
    Ok(Some(Node::Sqrt {
        index,
        radicand: Box::new(radicand),
    }))
}

pub(crate) fn render(
    index: Option<&GroupNode>,
    radicand: &Node,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    let radicand = radicand.render(cx)?;
    match index {
        Some(index) => Ok(format!(
            "\\sqrt[{}]{{{radicand}}}",
            group::render_group(index, false, true, cx)?
        )),
        None => Ok(format!("\\sqrt{{{radicand}}}")),
    }
}

#[cfg(test)]
mod tests {
    use crate::functions::testing::parse_and_render;

    #[test]
    fn radicand_forms() {
        assert_eq!(parse_and_render(r"\sqrt5"), r"\sqrt{5}");
        assert_eq!(parse_and_render(r"\sqrt {2a}"), r"\sqrt{2a}");
        assert_eq!(parse_and_render(r"\sqrt 2a}"), r"\sqrt{2}");
    }

    #[test]
    fn radical_index() {
        assert_eq!(parse_and_render(r"\sqrt[3]5"), r"\sqrt[3]{5}");
        assert_eq!(parse_and_render(r"\sqrt[3]\frac12"), r"\sqrt[3]{\frac{1}{2}}");
    }
}
