//! Context-sensitive tokenizer for LaTeX math fragments.
//!
//! The stream owns the character buffer and a monotonic cursor. Every peek
//! records how far the matching read would advance, so callers can test a
//! token, a single character or a matcher-shaped token before committing.
//! Blank characters are never part of a token; internal blanks inside an
//! alphanumeric run are stripped, which is what lets `S _ O A B` lex as
//! `S`, `_`, `OAB`.
//!
//! A re-tokenization step runs on every raw token: when an alphanumeric run
//! contains one of the complete function names (`sin`, `cos`, `tan`, `lg`,
//! `ln`, `log`) not preceded by `arc`, the run is split so the name becomes
//! its canonical command token and the remainder is re-read, tolerating
//! whitespace inserted between the letters (`s in` still fuses to `\sin`).
//!
//! A second, fragment mode re-lexes strings that are themselves rendered
//! output: numeric runs and uppercase runs stay fused, lowercase letters
//! come out one at a time. The monomial renderer uses it to decide spacing
//! around multi-letter commands.

use std::sync::OnceLock;

use crate::mapping::TokenMappings;
use crate::types::Settings;

/// Complete function names fused out of alphanumeric runs, with their
/// canonical command tokens. Checked in this order.
const COMPLETE_TOKENS: &[(&str, &str)] = &[
    ("sin", "\\sin"),
    ("cos", "\\cos"),
    ("tan", "\\tan"),
    ("lg", "\\lg"),
    ("ln", "\\ln"),
    ("log", "\\log"),
];

/// Greek tokens accepted inside a monomial and folded into trigonometric
/// arguments after a fraction.
pub(crate) const GREEK_TOKENS: &[&str] = &[
    "π", "\\pi", "\\beta", "\\alpha", "\\sigma", "\\phi", "\\Phi", "\\theta", "\\gamma",
    "\\delta", "\\epsilon", "\\varepsilon", "\\zeta", "\\eta", "\\rho", "\\lambda", "\\mu",
    "\\xi", "\\psi", "\\omega",
];

const fn is_blank(ch: char) -> bool {
    ch == ' '
}

fn match_control_word(s: &[char]) -> usize {
    if s.first() != Some(&'\\') {
        return 0;
    }
    let letters = s[1..].iter().take_while(|c| c.is_ascii_alphabetic()).count();
    if letters == 0 {
        0
    } else {
        1 + letters
    }
}

fn match_row_separator(s: &[char]) -> usize {
    if s.len() >= 2 && s[0] == '\\' && s[1] == '\\' {
        2
    } else {
        0
    }
}

/// Length of an alphanumeric run (plus `.`), skipping blanks, ending at the
/// last alphanumeric character.
fn match_alnum_run(s: &[char]) -> usize {
    let mut end = 0;
    for (idx, &ch) in s.iter().enumerate() {
        if is_blank(ch) {
            continue;
        }
        if ch.is_alphanumeric() || ch == '.' {
            end = idx + 1;
        } else {
            break;
        }
    }
    end
}

fn match_numeric_run(s: &[char]) -> usize {
    let mut end = 0;
    for (idx, &ch) in s.iter().enumerate() {
        if is_blank(ch) {
            continue;
        }
        if ch.is_numeric() || ch == '.' {
            end = idx + 1;
        } else {
            break;
        }
    }
    end
}

fn match_upper_run(s: &[char]) -> usize {
    let mut end = 0;
    for (idx, &ch) in s.iter().enumerate() {
        if is_blank(ch) {
            continue;
        }
        if ch.is_alphabetic() && ch.is_uppercase() {
            end = idx + 1;
        } else {
            break;
        }
    }
    end
}

/// Matches a monomial prefix: `digits? letter/Greek run`, a single-digit
/// decimal, or a bare digit run, in that order. Returns the matched length.
pub(crate) fn match_monomial(s: &[char]) -> Option<usize> {
    // digit prefix gives characters back until a letter unit can follow
    let digits = s
        .iter()
        .take_while(|&&c| c.is_ascii_digit() || c == ' ')
        .count();
    let mut lead = digits;
    loop {
        let units = match_unit_run(&s[lead..]);
        if units > 0 {
            return Some(lead + units);
        }
        if lead == 0 {
            break;
        }
        lead -= 1;
    }
    if s.first().is_some_and(|c| c.is_ascii_digit()) {
        let mut idx = 1;
        while idx < s.len() && s[idx].is_whitespace() {
            idx += 1;
        }
        if idx < s.len() && s[idx] == '.' {
            idx += 1;
            let frac = s[idx..]
                .iter()
                .take_while(|&&c| c.is_ascii_digit() || c == ' ')
                .count();
            if frac > 0 {
                return Some(idx + frac);
            }
        }
    }
    let run = s.iter().take_while(|c| c.is_ascii_digit()).count();
    (run > 0).then_some(run)
}

fn match_unit_run(s: &[char]) -> usize {
    let mut idx = 0;
    while idx < s.len() {
        let ch = s[idx];
        if ch == ' ' || ch.is_ascii_alphabetic() {
            idx += 1;
            continue;
        }
        match greek_at(&s[idx..]) {
            Some(len) => idx += len,
            None => break,
        }
    }
    idx
}

/// Length of the Greek token starting at `s`, if any.
pub(crate) fn greek_at(s: &[char]) -> Option<usize> {
    GREEK_TOKENS.iter().find_map(|token| {
        let pat: Vec<char> = token.chars().collect();
        (s.len() >= pat.len() && s[..pat.len()] == pat[..]).then_some(pat.len())
    })
}

/// Finds `pattern` in `hay` with any amount of whitespace inserted between
/// its characters, returning the matched span.
fn search_with_blanks(pattern: &str, hay: &[char]) -> Option<(usize, usize)> {
    let pat: Vec<char> = pattern.chars().collect();
    for start in 0..hay.len() {
        let mut pos = start;
        let mut matched = 0;
        while matched < pat.len() && pos < hay.len() {
            if hay[pos] == pat[matched] {
                pos += 1;
                matched += 1;
            } else if matched > 0 && hay[pos].is_whitespace() {
                pos += 1;
            } else {
                break;
            }
        }
        if matched == pat.len() {
            return Some((start, pos));
        }
    }
    None
}

fn further_candidate(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c == ' ' || c.is_ascii_alphanumeric())
}

/// Per-stream lexing options, resolved from [`Settings`] once per call.
#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    /// Apply the symbol-alias table to every token.
    pub normalize_token: bool,
    /// Apply the case-folding table to every token.
    pub fold_similar_capitals: bool,
    /// Keep `\left` / `\right` markers in the token stream.
    pub keep_left_right_marker: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            normalize_token: false,
            fold_similar_capitals: false,
            keep_left_right_marker: true,
        }
    }
}

impl LexOptions {
    /// Resolves the lexing options for one normalization call.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            normalize_token: settings.normalize_token,
            fold_similar_capitals: settings.ignore_similar_despite_capital,
            keep_left_right_marker: settings.keep_left_right_marker,
        }
    }
}

static EMPTY_MAPPINGS: OnceLock<TokenMappings> = OnceLock::new();

/// The lexical source: raw character buffer, monotonic cursor and the
/// peek-then-commit protocol.
pub struct TokenStream<'a> {
    chars: Vec<char>,
    pos: usize,
    peek_delta: usize,
    opts: LexOptions,
    strip_angle: bool,
    mappings: &'a TokenMappings,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `input`. When token normalization is on, the
    /// global character substitution table is applied to the whole buffer
    /// first.
    #[must_use]
    pub fn new(input: &str, opts: LexOptions, mappings: &'a TokenMappings) -> Self {
        let buffer = if opts.normalize_token {
            mappings.substitute_chars(input)
        } else {
            input.to_owned()
        };
        Self {
            chars: buffer.chars().collect(),
            pos: 0,
            peek_delta: 0,
            opts,
            strip_angle: false,
            mappings,
        }
    }

    /// Creates a stream for re-lexing rendered output in fragment mode; no
    /// token normalization applies.
    #[must_use]
    pub fn fragment(input: &str) -> TokenStream<'static> {
        TokenStream {
            chars: input.chars().collect(),
            pos: 0,
            peek_delta: 0,
            opts: LexOptions::default(),
            strip_angle: false,
            mappings: EMPTY_MAPPINGS.get_or_init(TokenMappings::empty),
        }
    }

    /// Toggles `\angle` skipping; active while a trigonometric argument is
    /// being parsed under the strip-angle policy.
    pub fn set_strip_angle(&mut self, active: bool) {
        self.strip_angle = active;
    }

    /// Rewinds the stream to the beginning.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.peek_delta = 0;
    }

    /// Returns the next valid token without consuming it. Invalid tokens
    /// (policy-rejected markers) are skipped permanently.
    pub fn peek(&mut self) -> Option<String> {
        if self.pos >= self.chars.len() {
            return None;
        }
        loop {
            let token = self.peek_one_token()?;
            if self.is_valid_token(&token) {
                return Some(token);
            }
            self.pos += self.peek_delta;
        }
    }

    /// Returns the next valid token and consumes it.
    pub fn read(&mut self) -> Option<String> {
        let token = self.peek()?;
        self.pos += self.peek_delta;
        Some(token)
    }

    /// Returns the next non-blank character without consuming it.
    pub fn peek_one_char(&mut self) -> Option<char> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let mut delta = 0;
        let mut found = None;
        for (idx, &ch) in self.chars[self.pos..].iter().enumerate() {
            delta = idx + 1;
            if !is_blank(ch) {
                found = Some(ch);
                break;
            }
        }
        self.peek_delta = delta;
        found
    }

    /// Returns the next non-blank character and consumes it.
    pub fn read_one_char(&mut self) -> Option<char> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let ch = self.peek_one_char();
        self.pos += self.peek_delta;
        ch
    }

    /// Returns the next token when it matches `matcher`, without consuming
    /// it. The matcher sees the raw character tail and reports the matched
    /// prefix length; it is re-applied after re-tokenization so a fused
    /// command cannot masquerade as a match.
    pub fn peek_with_matcher<F>(&mut self, matcher: F) -> Option<String>
    where
        F: Fn(&[char]) -> Option<usize>,
    {
        if self.pos >= self.chars.len() {
            return None;
        }
        let skip = self.chars[self.pos..]
            .iter()
            .position(|&c| !is_blank(c))?;
        self.peek_delta = skip;
        let rest = &self.chars[self.pos + skip..];
        let len = matcher(rest)?;
        let matched: String = rest[..len].iter().collect();
        let (token, delta) = self.further_tokenize(matched, skip + len);
        self.peek_delta = delta;
        let token_chars: Vec<char> = token.chars().collect();
        matcher(&token_chars).map(|_| token)
    }

    /// Returns the next token when it matches `matcher` and consumes it.
    pub fn read_with_matcher<F>(&mut self, matcher: F) -> Option<String>
    where
        F: Fn(&[char]) -> Option<usize>,
    {
        let token = self.peek_with_matcher(matcher)?;
        self.pos += self.peek_delta;
        Some(token)
    }

    /// Reads the next token in fragment mode.
    pub fn read_fragment(&mut self) -> Option<String> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let token = self.peek_fragment()?;
        self.pos += self.peek_delta;
        Some(token)
    }

    /// Drains the remaining tokens; used by the lenient fallback and tests.
    pub fn collect_tokens(&mut self) -> Vec<String> {
        let mut tokens = Vec::new();
        while let Some(token) = self.read() {
            tokens.push(token);
        }
        tokens
    }

    /// Drains the remaining tokens in fragment mode.
    pub fn collect_fragments(&mut self) -> Vec<String> {
        let mut tokens = Vec::new();
        while let Some(token) = self.read_fragment() {
            tokens.push(token);
        }
        tokens
    }

    fn peek_one_token(&mut self) -> Option<String> {
        let (raw, delta) = self.get_token(self.pos);
        let (token, delta) = self.further_tokenize(raw, delta);
        self.peek_delta = delta;
        if token.is_empty() {
            return None;
        }
        Some(self.apply_mappings(token))
    }

    fn peek_fragment(&mut self) -> Option<String> {
        loop {
            let (raw, delta) = self.get_frag_token(self.pos);
            let (token, delta) = self.further_tokenize(raw, delta);
            self.peek_delta = delta;
            if token.is_empty() {
                return None;
            }
            let token = self.apply_mappings(token);
            if self.is_valid_token(&token) {
                return Some(token);
            }
            self.pos += self.peek_delta;
        }
    }

    fn get_token(&self, from: usize) -> (String, usize) {
        let s = &self.chars[from.min(self.chars.len())..];
        for (idx, &ch) in s.iter().enumerate() {
            if is_blank(ch) {
                continue;
            }
            let len = if ch == '\\' {
                match_control_word(&s[idx..])
                    .max(match_row_separator(&s[idx..]))
                    .max(2)
            } else if ch.is_alphanumeric() {
                match_alnum_run(&s[idx..])
            } else {
                1
            };
            let end = (idx + len).min(s.len());
            let token: String = s[idx..end].iter().filter(|&&c| !is_blank(c)).collect();
            return (token, end);
        }
        (String::new(), 0)
    }

    fn get_frag_token(&self, from: usize) -> (String, usize) {
        let s = &self.chars[from.min(self.chars.len())..];
        for (idx, &ch) in s.iter().enumerate() {
            if is_blank(ch) {
                continue;
            }
            let len = if ch == '\\' {
                match_control_word(&s[idx..])
                    .max(match_row_separator(&s[idx..]))
                    .max(2)
            } else if ch.is_numeric() {
                match_numeric_run(&s[idx..])
            } else if ch.is_alphabetic() && ch.is_uppercase() {
                match_upper_run(&s[idx..])
            } else {
                1
            };
            let end = (idx + len).min(s.len());
            let token: String = s[idx..end].iter().filter(|&&c| !is_blank(c)).collect();
            return (token, end);
        }
        (String::new(), 0)
    }

    /// Splits complete function names out of an alphanumeric run.
    fn further_tokenize(&self, token: String, delta: usize) -> (String, usize) {
        if !further_candidate(&token) {
            return (token, delta);
        }
        for &(name, target) in COMPLETE_TOKENS {
            if !token.contains(name) {
                continue;
            }
            // arcsin, arccos, arctan must stay whole
            if matches!(name, "sin" | "cos" | "tan") && token.contains(&format!("arc{name}")) {
                continue;
            }
            let end = (self.pos + delta).min(self.chars.len());
            let raw = &self.chars[self.pos..end];
            let Some((found_start, found_end)) = search_with_blanks(name, raw) else {
                continue;
            };
            match token.find(name) {
                Some(0) => return (target.to_owned(), found_end),
                Some(at) => return (token[..at].to_owned(), found_start),
                None => {}
            }
        }
        (token, delta)
    }

    fn apply_mappings(&self, token: String) -> String {
        let token = if self.opts.normalize_token {
            self.mappings.apply_alias(token)
        } else {
            token
        };
        if self.opts.fold_similar_capitals {
            self.mappings.apply_fold(token)
        } else {
            token
        }
    }

    fn is_valid_token(&self, token: &str) -> bool {
        if !self.opts.keep_left_right_marker && matches!(token, "\\left" | "\\right") {
            return false;
        }
        !(self.strip_angle && token == "\\angle")
    }
}
