//! The monomial leaf: a coefficient/variable/Greek-letter run with at most
//! one attached superscript and one subscript.

use super::{canonical_order, scripts, RenderCx};
use crate::lexer::{match_monomial, TokenStream};
use crate::parser::parse_node::Node;
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Parses a monomial through the stream's pattern interface; the scripts
/// attach in either order, one of each at most.
pub(crate) fn parse(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    let Some(token) = parser.stream.read_with_matcher(match_monomial) else {
        return Ok(None);
    };
    let mut children = vec![Node::Raw(token)];
    let mut sup_taken = false;
    let mut sub_taken = false;
    for _ in 0..2 {
        if !sup_taken {
            if let Some(node) = scripts::parse_sup(parser)? {
                children.push(node);
                sup_taken = true;
                continue;
            }
        }
        if !sub_taken {
            if let Some(node) = scripts::parse_sub(parser)? {
                children.push(node);
                sub_taken = true;
            }
        }
    }
    Ok(Some(Node::Monomial(children)))
}

/// Renders a monomial: concatenate the canonical-ordered children, then
/// re-lex the result in fragment mode and put a single space after every
/// multi-letter command that is not the last token, so `3\pi x` stays
/// distinguishable from `3\pix`.
pub(crate) fn render(children: &[Node], cx: &RenderCx<'_>) -> Result<String, NormalizeError> {
    let mut value = String::new();
    for node in canonical_order(children) {
        value.push_str(&node.render(cx)?);
    }
    Ok(respace(&value))
}

fn respace(value: &str) -> String {
    let tokens = TokenStream::fragment(value).collect_fragments();
    let last = tokens.len().saturating_sub(1);
    let mut pieces: Vec<String> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        if is_control_word(token) && tokens.len() != 1 && idx != last {
            pieces.push(format!("{token} "));
        } else {
            if !starts_alphanumeric(token) {
                if let Some(prev) = pieces.last_mut() {
                    *prev = prev.trim_end().to_owned();
                }
            }
            pieces.push(token.trim().to_owned());
        }
    }
    pieces.concat()
}

fn is_control_word(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('\\') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn starts_alphanumeric(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
}
