//! Placeholder grammar.
//!
//! A placeholder is any `%...%` run without a nested `%`:
//!
//! ```text
//! %path%                     value lookup
//! %path/border:0101;fit:auto% lookup plus style directives
//! %"literal"%                constant, always replaced by its bare text
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sheetfill_grid::BorderSides;
use std::borrow::Cow;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[^%]+%").unwrap());
static CONSTANT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"%"([^"]+)"%"#).unwrap());
static FIT_AUTO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(/|;)fit:auto(;)?").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    Auto,
    #[default]
    None,
}

/// Style directives attached after the first `/` of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directive {
    /// Sides to strip; a `0` in the `border` mask selects the side.
    pub clear_borders: BorderSides,
    pub fit: Fit,
}

impl Directive {
    /// Parses `key:value;key:value`. Unknown keys are ignored, a `border` mask must be
    /// exactly four characters.
    pub fn parse(raw: &str) -> Self {
        let mut directive = Directive::default();
        for part in raw.split(';') {
            let (key, value) = part.split_once(':').unwrap_or((part, ""));
            match key.trim() {
                "border" => {
                    let mask: Vec<char> = value.trim().chars().collect();
                    if mask.len() == 4 {
                        directive.clear_borders = BorderSides {
                            top: mask[0] == '0',
                            right: mask[1] == '0',
                            bottom: mask[2] == '0',
                            left: mask[3] == '0',
                        };
                    } else {
                        tracing::debug!(mask = value, "ignoring border mask that is not 4 wide");
                    }
                }
                "fit" => {
                    if value.trim() == "auto" {
                        directive.fit = Fit::Auto;
                    }
                }
                _ => {}
            }
        }
        directive
    }

    pub fn is_noop(&self) -> bool {
        !self.clear_borders.any() && self.fit == Fit::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Variable {
        path: String,
        directive: Option<Directive>,
    },
    Constant(String),
}

impl Placeholder {
    /// Parses a token including its surrounding `%`.
    pub fn parse(token: &str) -> Self {
        let inner = token
            .strip_prefix('%')
            .and_then(|t| t.strip_suffix('%'))
            .unwrap_or(token);
        if let Some(literal) = constant_literal(inner) {
            return Placeholder::Constant(literal.to_string());
        }
        match inner.split_once('/') {
            Some((path, raw)) => Placeholder::Variable {
                path: path.to_string(),
                directive: Some(Directive::parse(raw)),
            },
            None => Placeholder::Variable {
                path: inner.to_string(),
                directive: None,
            },
        }
    }
}

fn constant_literal(inner: &str) -> Option<&str> {
    let literal = inner.strip_prefix('"')?.strip_suffix('"')?;
    (!literal.is_empty() && !literal.contains('"')).then_some(literal)
}

fn token_path(token: &str) -> &str {
    let inner = &token[1..token.len() - 1];
    inner.split_once('/').map(|(p, _)| p).unwrap_or(inner)
}

/// Every `%...%` token in `text`, left to right, non-overlapping.
pub fn tokens(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn has_token(text: &str) -> bool {
    TOKEN.is_match(text)
}

pub fn has_constant(text: &str) -> bool {
    CONSTANT.is_match(text)
}

pub fn constant_count(text: &str) -> usize {
    CONSTANT.find_iter(text).count()
}

/// Replaces every `%"literal"%` by `literal`.
pub fn strip_constants(text: &str) -> Cow<'_, str> {
    CONSTANT.replace_all(text, "$1")
}

/// True when `text` holds a placeholder that is neither a constant nor rooted at `root`.
pub fn has_foreign_placeholder(text: &str, root: &str) -> bool {
    TOKEN.find_iter(text).any(|m| {
        let token = m.as_str();
        constant_literal(&token[1..token.len() - 1]).is_none() && !is_rooted(token, root)
    })
}

fn is_rooted(token: &str, root: &str) -> bool {
    token_path(token)
        .strip_prefix(root)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('.'))
}

/// True when `text` holds a `%<root>.<field>%` placeholder.
pub fn references_root(text: &str, root: &str) -> bool {
    TOKEN.find_iter(text).any(|m| is_rooted(m.as_str(), root))
}

/// Rewrites every `%<root>.x%` token to `%<index>.<root>.x%`, leaving other tokens alone.
pub fn prefix_root(text: &str, root: &str, index: usize) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[0];
            if is_rooted(token, root) {
                format!("%{index}.{}", &token[1..])
            } else {
                token.to_string()
            }
        })
        .into_owned()
}

/// Drops the `fit:auto` directive and whichever separator it no longer needs, so
/// `/fit:auto;border:0101` keeps its `/`.
pub fn strip_fit_auto(text: &str) -> Cow<'_, str> {
    FIT_AUTO.replace_all(text, |caps: &Captures<'_>| match caps.get(2) {
        Some(_) => caps[1].to_string(),
        None => String::new(),
    })
}
