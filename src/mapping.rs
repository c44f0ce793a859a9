//! Symbol lookup tables and their adapters.
//!
//! Three flat string-to-string tables drive token canonicalization: the
//! alias table (`\geqslant` → `\ge`), the case-folding table (single
//! capital letters to their lowercase forms) and the global character
//! substitution table (`π` → `\pi`, applied to the whole input before
//! lexing). A fourth table maps spoken measurement units to LaTeX unit
//! macros for sentence normalization.
//!
//! Built-in defaults are compile-time [`phf`] maps; external overrides are
//! flat text documents with one `key<TAB>value` pair per line (blank lines
//! and `#` comments ignored), loaded once into the owning
//! [`NormContext`](crate::NormContext).

use phf::phf_map;

use crate::namespace::KeyMap;
use crate::types::NormalizeError;

static TOKEN_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "\\geqslant" => "\\ge",
    "\\leqslant" => "\\le",
    "\\geq" => "\\ge",
    "\\leq" => "\\le",
    "\\gneq" => "\\gt",
    "\\lneq" => "\\lt",
    ">" => "\\gt",
    "<" => "\\lt",
    "\\neq" => "\\ne",
    "\\degree" => "\\circ",
    "\\dots" => "\\cdots",
    "\\ldots" => "\\cdots",
};

static CASE_FOLDS: phf::Map<&'static str, &'static str> = phf_map! {
    "A" => "a", "B" => "b", "C" => "c", "D" => "d", "E" => "e", "F" => "f",
    "G" => "g", "H" => "h", "I" => "i", "J" => "j", "K" => "k", "L" => "l",
    "M" => "m", "N" => "n", "O" => "o", "P" => "p", "Q" => "q", "R" => "r",
    "S" => "s", "T" => "t", "U" => "u", "V" => "v", "W" => "w", "X" => "x",
    "Y" => "y", "Z" => "z",
};

static CHAR_SUBSTITUTIONS: phf::Map<char, &'static str> = phf_map! {
    'π' => "\\pi ",
    '⋅' => "\\cdot ",
    '×' => "\\times ",
    '÷' => "\\div ",
    '–' => "-",
    '—' => "-",
    '−' => "-",
    '≥' => "\\ge ",
    '≤' => "\\le ",
    '≠' => "\\ne ",
    '∠' => "\\angle ",
};

/// Spoken measurement units recognized right after a closing `$`, in match
/// priority order.
const UNIT_TABLE: &[(&str, &str)] = &[
    ("米", "m"),
    ("厘米", "cm"),
    ("分米", "dm"),
    ("毫米", "mm"),
    ("千米", "km"),
    ("平方米", "m^2"),
    ("平方厘米", "cm^2"),
    ("平方毫米", "mm^2"),
    ("平方千米", "km^2"),
    ("立方米", "m^3"),
    ("立方厘米", "cm^3"),
    ("立方分米", "dm^3"),
    ("立方毫米", "mm^3"),
    ("千克", "kg"),
    ("克", "g"),
    ("吨", "t"),
    ("毫克", "mg"),
    ("秒", "s"),
    ("毫秒", "ms"),
    ("小时", "h"),
    ("分钟", "min"),
    ("厘米每秒", "cm/s"),
    ("米每秒", "m/s"),
    ("千米每小时", "km/h"),
    ("度", "^{\\circ}"),
    ("摄氏度", "^{\\circ}C"),
    ("千克每立方米", "kg/m^3"),
    ("立方米每小时", "m^3/h"),
    ("吨每分钟", "t/min"),
    ("帕斯卡", "Pa"),
    ("帕", "Pa"),
    ("千帕", "kPa"),
    ("千帕斯卡", "kPa"),
    ("牛顿", "N"),
    ("牛", "N"),
    ("安培", "A"),
    ("安", "A"),
    ("欧姆", "\\Omega"),
    ("欧", "\\Omega"),
    ("伏特", "V"),
    ("伏", "V"),
];

/// Units inserted without a `\rm` wrapper.
const BARE_UNITS: &[&str] = &["度", "摄氏度"];

/// Runtime view of the three token tables.
///
/// The default instance serves the built-in `phf` tables; loading an
/// external document overlays its entries.
#[derive(Debug)]
pub struct TokenMappings {
    alias: KeyMap<String, String>,
    fold: KeyMap<String, String>,
    substitutions: KeyMap<char, String>,
}

impl Default for TokenMappings {
    fn default() -> Self {
        let mut mappings = Self::empty();
        for (key, value) in TOKEN_ALIASES.entries() {
            mappings.alias.insert((*key).to_owned(), (*value).to_owned());
        }
        for (key, value) in CASE_FOLDS.entries() {
            mappings.fold.insert((*key).to_owned(), (*value).to_owned());
        }
        for (key, value) in CHAR_SUBSTITUTIONS.entries() {
            mappings.substitutions.insert(*key, (*value).to_owned());
        }
        mappings
    }
}

impl TokenMappings {
    /// Creates a table set with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            alias: KeyMap::default(),
            fold: KeyMap::default(),
            substitutions: KeyMap::default(),
        }
    }

    /// Maps a token through the alias table, returning it unchanged when no
    /// alias is recorded.
    #[must_use]
    pub fn apply_alias(&self, token: String) -> String {
        match self.alias.get(&token) {
            Some(mapped) => mapped.clone(),
            None => token,
        }
    }

    /// Maps a token through the case-folding table, returning it unchanged
    /// when no folding is recorded.
    #[must_use]
    pub fn apply_fold(&self, token: String) -> String {
        match self.fold.get(&token) {
            Some(mapped) => mapped.clone(),
            None => token,
        }
    }

    /// Applies the global character substitution table to a whole buffer.
    #[must_use]
    pub fn substitute_chars(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for ch in input.chars() {
            match self.substitutions.get(&ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out
    }

    /// Overlays entries from an external alias table document.
    pub fn load_alias_table(&mut self, text: &str) -> Result<(), NormalizeError> {
        for (key, value) in parse_table(text)? {
            self.alias.insert(key, value);
        }
        Ok(())
    }

    /// Overlays entries from an external case-folding table document.
    pub fn load_fold_table(&mut self, text: &str) -> Result<(), NormalizeError> {
        for (key, value) in parse_table(text)? {
            self.fold.insert(key, value);
        }
        Ok(())
    }

    /// Overlays entries from an external character substitution document.
    /// Keys must be single characters.
    pub fn load_substitution_table(&mut self, text: &str) -> Result<(), NormalizeError> {
        for (line, (key, value)) in parse_table(text)?.into_iter().enumerate() {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    self.substitutions.insert(ch, value);
                }
                _ => {
                    return Err(NormalizeError::InvalidMappingFormat {
                        line: line + 1,
                        content: key,
                    })
                }
            }
        }
        Ok(())
    }
}

/// Parses a flat `key<TAB>value` document into its entry list.
pub fn parse_table(text: &str) -> Result<Vec<(String, String)>, NormalizeError> {
    let mut entries = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('\t') {
            Some((key, value)) if !key.is_empty() => {
                entries.push((key.to_owned(), value.to_owned()));
            }
            _ => {
                return Err(NormalizeError::InvalidMappingFormat {
                    line: idx + 1,
                    content: line.to_owned(),
                })
            }
        }
    }
    Ok(entries)
}

/// Expands recognized spoken measurement units that directly follow a
/// formula, moving the unit macro inside the closing `$`.
///
/// `其中$64$米的长度` becomes `其中$64 \rm m$的长度`; the degree and Celsius
/// units use their bare `^{\circ}` forms without `\rm`.
#[must_use]
pub fn expand_units(sentence: &str) -> String {
    let chars: Vec<char> = sentence.chars().collect();
    let mut preceding_slash = false;
    let mut in_formula = false;
    // (closing-$ index, index past the unit, unit key, unit latex)
    let mut found: Vec<(usize, usize, &str, &str)> = Vec::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if ch == '\\' {
            preceding_slash = true;
        } else if ch == '$' {
            if preceding_slash {
                preceding_slash = false;
                continue;
            }
            in_formula = !in_formula;
            if !in_formula {
                let mut start = idx + 1;
                while start < chars.len() && chars[start] == ' ' {
                    start += 1;
                }
                if let Some((unit, latex)) = unit_at(&chars[start.min(chars.len())..]) {
                    found.push((idx, start + unit.chars().count(), unit, latex));
                }
            }
        } else {
            preceding_slash = false;
        }
    }

    let mut out = String::new();
    let mut start = 0;
    for (dollar, end, unit, latex) in found {
        out.extend(chars[start..dollar].iter());
        if BARE_UNITS.contains(&unit) {
            out.push_str(&format!(" {latex}$"));
        } else {
            out.push_str(&format!(" \\rm {latex}$"));
        }
        start = end;
    }
    out.extend(chars[start.min(chars.len())..].iter());
    out
}

fn unit_at(s: &[char]) -> Option<(&'static str, &'static str)> {
    UNIT_TABLE.iter().copied().find(|(unit, _)| {
        let pat: Vec<char> = unit.chars().collect();
        s.len() >= pat.len() && s[..pat.len()] == pat[..]
    })
}
