use fancy_regex::{Regex, RegexBuilder};
use std::borrow::Cow;

use crate::error::{AuditError, Result};

/// Prefix marking a denylist entry as a regular expression
pub const REGEX_PREFIX: &str = "regex:";

/// Backtracking budget per match; a license name that exhausts it is treated
/// as unmatched
const BACKTRACK_LIMIT: usize = 100_000;

/// Upper bound on `?` atoms expanded inside a single look-behind
const MAX_OPTIONAL_ATOMS: usize = 6;

/// Strip the `regex:` prefix and XML-unescape the remainder.
///
/// Denylists are often copied from XML build descriptors, so `&lt;` and
/// friends are turned back into the characters they stand for. Text with an
/// unknown or unterminated entity is returned as written.
///
/// Only a leading prefix is removed: `regex:` appearing later in the body is
/// kept and becomes part of the expression.
pub fn parse_as_regex(entry: &str) -> String {
    let body = entry.strip_prefix(REGEX_PREFIX).unwrap_or(entry);
    quick_xml::escape::unescape(body)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| body.to_string())
}

fn compile(source: &str) -> std::result::Result<Regex, fancy_regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .backtrack_limit(BACKTRACK_LIMIT)
        .build()
}

/// Compile a normalized body, retrying with bounded look-behinds expanded
/// into fixed-width ones when the engine rejects a variable-width one.
fn compile_pattern(source: &str) -> std::result::Result<Regex, fancy_regex::Error> {
    match compile(source) {
        Ok(regex) => Ok(regex),
        Err(err) => match expand_lookbehinds(source) {
            Some(expanded) => compile(&expanded).map_err(|_| err),
            None => Err(err),
        },
    }
}

/// Rewrite look-behinds whose width only varies through `?` atoms into
/// fixed-width alternatives: `(?<!\+\s?)` becomes `(?<!\+\s)(?<!\+)` and
/// `(?<=a?b)` becomes `(?:(?<=ab)|(?<=b))`.
///
/// Returns `None` when nothing was rewritten or a look-behind holds groups,
/// alternations or unbounded repetition.
fn expand_lookbehinds(source: &str) -> Option<String> {
    let mut out = String::with_capacity(source.len() * 2);
    let mut rest = source;
    let mut changed = false;

    while let Some(start) = find_lookbehind(rest) {
        out.push_str(&rest[..start]);
        let negative = rest[start..].starts_with("(?<!");
        let body_start = start + 4;
        let (atoms, body_len) = split_atoms(&rest[body_start..])?;

        let variants = expand_optional(&atoms)?;
        changed |= variants.len() > 1;
        if negative {
            for variant in &variants {
                out.push_str(&format!("(?<!{})", variant));
            }
        } else {
            let alternatives: Vec<String> =
                variants.iter().map(|variant| format!("(?<={})", variant)).collect();
            out.push_str(&format!("(?:{})", alternatives.join("|")));
        }

        rest = &rest[body_start + body_len + 1..];
    }

    out.push_str(rest);
    changed.then_some(out)
}

/// Byte offset of the next unescaped `(?<!` or `(?<=` outside a class
fn find_lookbehind(text: &str) -> Option<usize> {
    let mut escaped = false;
    let mut in_class = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class => {
                let tail = &text[i..];
                if tail.starts_with("(?<!") || tail.starts_with("(?<=") {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split a look-behind body into `(atom, optional)` pairs, returning them
/// with the byte length of the body up to its closing `)`.
fn split_atoms(body: &str) -> Option<(Vec<(String, bool)>, usize)> {
    let mut atoms: Vec<(String, bool)> = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            ')' => return Some((atoms, i)),
            '(' | '|' | '*' | '+' | '{' => return None,
            '?' => {
                let last = atoms.last_mut()?;
                if last.1 {
                    return None;
                }
                last.1 = true;
            }
            '\\' => {
                let (_, next) = chars.next()?;
                atoms.push((format!("\\{}", next), false));
            }
            '[' => {
                let mut class = String::from("[");
                let mut escaped = false;
                loop {
                    let (_, next) = chars.next()?;
                    class.push(next);
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == ']' && class.len() > 2 {
                        break;
                    }
                }
                atoms.push((class, false));
            }
            other => atoms.push((other.to_string(), false)),
        }
    }

    None
}

fn expand_optional(atoms: &[(String, bool)]) -> Option<Vec<String>> {
    if atoms.iter().filter(|(_, optional)| *optional).count() > MAX_OPTIONAL_ATOMS {
        return None;
    }

    let mut variants = vec![String::new()];
    for (atom, optional) in atoms {
        if *optional {
            let without = variants.clone();
            for variant in &mut variants {
                variant.push_str(atom);
            }
            variants.extend(without);
        } else {
            for variant in &mut variants {
                variant.push_str(atom);
            }
        }
    }

    Some(variants)
}

/// A single denylist entry, classified once when the configuration is parsed
#[derive(Debug, Clone)]
pub enum ForbiddenPattern {
    /// Matched by case-insensitive equality
    Literal { entry: String, folded: String },
    /// Matched case-insensitively anywhere in the license name
    Regex { entry: String, regex: Regex },
}

impl ForbiddenPattern {
    pub fn parse(entry: &str) -> Result<Self> {
        if entry.starts_with(REGEX_PREFIX) {
            let source = parse_as_regex(entry);
            let regex = compile_pattern(&source).map_err(|e| AuditError::InvalidPattern {
                pattern: entry.to_string(),
                source: Box::new(e),
            })?;
            Ok(ForbiddenPattern::Regex {
                entry: entry.to_string(),
                regex,
            })
        } else {
            Ok(ForbiddenPattern::Literal {
                entry: entry.to_string(),
                folded: entry.to_lowercase(),
            })
        }
    }

    /// The configured string, used as key in the violation map
    pub fn entry(&self) -> &str {
        match self {
            ForbiddenPattern::Literal { entry, .. } | ForbiddenPattern::Regex { entry, .. } => entry,
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, ForbiddenPattern::Regex { .. })
    }

    pub fn matches(&self, license: &str) -> bool {
        match self {
            ForbiddenPattern::Literal { folded, .. } => license.to_lowercase() == *folded,
            // exhausted backtracking counts as no match
            ForbiddenPattern::Regex { regex, .. } => regex.is_match(license).unwrap_or(false),
        }
    }
}

/// Ordered denylist; the first entry that matches a license wins
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPatterns {
    patterns: Vec<ForbiddenPattern>,
}

impl ForbiddenPatterns {
    /// Compile every entry, failing on the first malformed `regex:` pattern
    pub fn parse<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = entries
            .into_iter()
            .map(|entry| ForbiddenPattern::parse(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First pattern in configured order matching `license`
    pub fn match_of(&self, license: &str) -> Option<&ForbiddenPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(license))
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(ForbiddenPattern::entry)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
