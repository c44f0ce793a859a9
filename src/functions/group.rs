//! Grouping nodes: brace/bracket/parenthesis groups, `\begin…\end`
//! environments and absolute-value bars.

use std::str::FromStr as _;

use strum::EnumString;

use super::{merge_siblings, RenderCx};
use crate::parser::parse_node::{EnvNode, GroupDelim, GroupNode, Node};
use crate::parser::Parser;
use crate::types::NormalizeError;

/// Closing markers accepted by any non-strict group.
pub(crate) const GROUP_CLOSERS: &[&str] = &["}", "]", ")"];

/// Parses a grouping node. In strict mode only the family's own closer
/// ends the group; used when the group is a known fixed-type argument.
pub(crate) fn parse_group(
    parser: &mut Parser<'_>,
    delim: GroupDelim,
    strict: bool,
) -> Result<Option<Node>, NormalizeError> {
    Ok(parse_group_node(parser, delim, strict)?.map(Node::Group))
}

pub(crate) fn parse_group_node(
    parser: &mut Parser<'_>,
    delim: GroupDelim,
    strict: bool,
) -> Result<Option<GroupNode>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some(delim.open()) {
        return Ok(None);
    }
    parser.stream.read();
    let strict_closer = [delim.close()];
    let closers: &[&str] = if strict { &strict_closer } else { GROUP_CLOSERS };
    let children = parser.read_until(closers)?;
    let close = parser.stream.read().unwrap_or_default();
    Ok(Some(GroupNode {
        delim,
        close,
        children,
    }))
}

/// Parses a `\begin…\end` environment: the strict brace name argument,
/// children until `\end`, then the strict trailing name argument.
pub(crate) fn parse_environment(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\begin") {
        return Ok(None);
    }
    parser.stream.read();
    let name = parse_group_node(parser, GroupDelim::Brace, true)?.ok_or_else(|| {
        NormalizeError::MissingArgument {
            command: "\\begin".to_owned(),
        }
    })?;
    let body = parser.read_until(&["\\end"])?;
    parser.stream.read();
    let end_name = parse_group_node(parser, GroupDelim::Brace, true)?.ok_or_else(|| {
        NormalizeError::MissingArgument {
            command: "\\end".to_owned(),
        }
    })?;
    Ok(Some(Node::Environment(EnvNode {
        name,
        end_name,
        body,
    })))
}

/// Parses `\vert … \vert` absolute-value bars.
pub(crate) fn parse_abs(parser: &mut Parser<'_>) -> Result<Option<Node>, NormalizeError> {
    if parser.stream.peek().as_deref() != Some("\\vert") {
        return Ok(None);
    }
    parser.stream.read();
    let children = parser.read_until(&["\\vert"])?;
    parser.stream.read();
    Ok(Some(Node::Abs(children)))
}

/// Renders a grouping node. A singleton child of the same non-brace kind
/// is flattened one level; brace groups merge their children under the
/// outermost-brace flag. The enclosing markers are emitted only when
/// `with_head` is set.
pub(crate) fn render_group(
    group: &GroupNode,
    with_head: bool,
    keep_outmost: bool,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    let content = if group.delim == GroupDelim::Brace {
        merge_siblings(&group.children, keep_outmost, cx)?
    } else if let [Node::Group(inner)] = group.children.as_slice() {
        if inner.delim == group.delim {
            render_group(inner, false, true, cx)?
        } else {
            merge_siblings(&group.children, true, cx)?
        }
    } else {
        merge_siblings(&group.children, true, cx)?
    };
    if with_head {
        Ok(format!("{}{}{}", group.delim.open(), content, group.close))
    } else {
        Ok(content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum EnvKind {
    Cases,
    Matrix,
    Array,
}

/// Renders a `\begin…\end` environment.
///
/// The body splits into rows on `\\`; empty rows are dropped and every row
/// is re-wrapped in `{}` unless it carries a literal `&` column separator.
/// An `array` consumes one extra column-spec argument before its rows.
pub(crate) fn render_environment(
    env: &EnvNode,
    cx: &RenderCx<'_>,
) -> Result<String, NormalizeError> {
    let name = render_group(&env.name, false, true, cx)?;
    let kind = EnvKind::from_str(&name).map_err(|_| NormalizeError::InvalidEnvironment {
        name: name.clone(),
    })?;

    let (header, row_source): (String, &[Node]) = match kind {
        EnvKind::Cases | EnvKind::Matrix => (format!("\\begin{{{name}}}"), &env.body),
        EnvKind::Array => {
            let Some((column_spec, rest)) = env.body.split_first() else {
                return Err(NormalizeError::MissingArgument {
                    command: "\\begin{array}".to_owned(),
                });
            };
            let spec = column_spec.render(cx)?;
            (format!("\\begin{{{name}}}{{{spec}}}"), rest)
        }
    };

    let mut rows = Vec::new();
    for row in row_source.split(|node| node.is_raw("\\\\")) {
        let has_separator = row.iter().any(|node| node.is_raw("&"));
        let content = merge_siblings(row, false, cx)?;
        if content.is_empty() {
            continue;
        }
        rows.push(if has_separator {
            content
        } else {
            format!("{{{content}}}")
        });
    }

    let end_name = render_group(&env.end_name, false, true, cx)?;
    Ok(format!(
        "{header} {} \\end{{{end_name}}}",
        rows.join(" \\\\ ")
    ))
}

/// Renders absolute-value bars; interior whitespace is trimmed at the
/// edges only.
pub(crate) fn render_abs(children: &[Node], cx: &RenderCx<'_>) -> Result<String, NormalizeError> {
    let content = merge_siblings(children, true, cx)?;
    Ok(format!("|{}|", content.trim_matches(' ')))
}
