//! Public entry points: expression and sentence normalization.

use crate::context::NormContext;
use crate::functions::{merge_siblings, RenderCx};
use crate::lexer::{LexOptions, TokenStream};
use crate::mapping;
use crate::functions::group;
use crate::parser::parse_node::GroupDelim;
use crate::parser::Parser;
use crate::types::{NormalizeError, Policy, Settings};

/// Normalizes one LaTeX math fragment (no `$` delimiters) into its
/// canonical rendering.
///
/// The input is wrapped in a synthetic outer brace group and parsed
/// strictly; the tree is then re-serialized under the policy derived from
/// `settings`. When parsing fails with a syntax error and
/// `ensure_valid_formula` is off, the result degrades to the space-joined
/// raw token sequence instead.
pub fn normalize_expression(
    ctx: &NormContext,
    latex: &str,
    settings: &Settings,
) -> Result<String, NormalizeError> {
    let policy = Policy::from_settings(&ctx.registry, settings)?;
    let opts = LexOptions::from_settings(settings);
    let wrapped = format!("{{{latex}}}");

    match parse_and_render(ctx, &wrapped, opts, &policy) {
        Ok(rendered) => Ok(rendered),
        Err(err) if err.is_syntax() && !settings.ensure_valid_formula => {
            log::debug!("normalization fell back to raw tokens: {err}");
            let mut stream = TokenStream::new(&wrapped, opts, &ctx.mappings);
            let tokens = stream.collect_tokens();
            let inner: &[String] = if tokens.len() >= 2 {
                &tokens[1..tokens.len() - 1]
            } else {
                &[]
            };
            Ok(inner.join(" ").trim().to_owned())
        }
        Err(err) => Err(err),
    }
}

fn parse_and_render(
    ctx: &NormContext,
    wrapped: &str,
    opts: LexOptions,
    policy: &Policy,
) -> Result<String, NormalizeError> {
    let stream = TokenStream::new(wrapped, opts, &ctx.mappings);
    let mut parser = Parser::new(stream, &ctx.registry, policy);
    let root = group::parse_group_node(&mut parser, GroupDelim::Brace, true)?.ok_or_else(|| {
        NormalizeError::MissingArgument {
            command: "{".to_owned(),
        }
    })?;
    let cx = RenderCx { policy };
    let rendered = merge_siblings(&root.children, policy.keep_outmost_brace, &cx)?;
    Ok(rendered.trim().to_owned())
}

/// Normalizes every `$...$` formula span inside a sentence, leaving the
/// literal runs untouched.
///
/// Recognized spoken measurement units directly after a formula are
/// expanded first (the unit macro moves inside the closing `$`, wrapped in
/// `\rm` except for the degree/Celsius forms); the sentence then splits on
/// unescaped `$` delimiters, each formula segment is normalized
/// independently, and the segments are rejoined with `$`.
pub fn normalize_in_sentence(
    ctx: &NormContext,
    sentence: &str,
    settings: &Settings,
) -> Result<String, NormalizeError> {
    let expanded = mapping::expand_units(sentence);
    let mut segments = split_formula_segments(&expanded);
    for idx in (1..segments.len()).step_by(2) {
        let normalized = normalize_expression(ctx, &segments[idx], settings)?;
        segments[idx] = normalized;
    }
    Ok(segments.join("$"))
}

/// Splits a sentence on unescaped `$` delimiters into alternating
/// literal/formula segments; `\$` is not a delimiter. Rejoining the
/// segments with `$` reproduces the original boundaries.
pub(crate) fn split_formula_segments(sentence: &str) -> Vec<String> {
    let chars: Vec<char> = sentence.chars().collect();
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut preceding_slash = false;
    let mut in_formula = false;
    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '\\' {
            preceding_slash = true;
        } else if ch == '$' {
            if preceding_slash {
                preceding_slash = false;
                continue;
            }
            in_formula = !in_formula;
            if in_formula {
                segments.push(chars[start..idx].iter().collect());
                start = idx;
            } else {
                segments.push(chars[start + 1..idx].iter().collect());
                start = idx + 1;
            }
        } else {
            preceding_slash = false;
        }
    }
    segments.push(chars[start.min(chars.len())..].iter().collect());
    segments
}
