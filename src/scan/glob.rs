//! Content glob matching.
//!
//! Patterns are compiled with [`glob::Pattern`] and matched with a literal
//! `/` separator, so `*` and `?` stay inside one path segment and `**` spans
//! directories. `{a,b}` alternations, which `glob` does not know, are
//! expanded into one pattern per alternative first.
//!
//! A leading `./` is ignored and a leading `!` marks an exclusion.

use glob::{MatchOptions, Pattern};
use thiserror::Error;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid glob `{pattern}`: {reason}")]
pub struct GlobError {
    pub pattern: String,
    pub reason: String,
}

/// A compiled content glob.
#[derive(Debug, Clone)]
pub struct Glob {
    negated: bool,
    /// One pattern per brace alternative.
    patterns: Vec<Pattern>,
}

impl Glob {
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        let fail = |reason: String| GlobError {
            pattern: pattern.to_string(),
            reason,
        };

        let (negated, body) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let body = body.strip_prefix("./").unwrap_or(body);
        if body.trim().is_empty() {
            return Err(fail("pattern is empty".into()));
        }

        let patterns = expand_braces(body)
            .map_err(|reason| fail(reason.into()))?
            .iter()
            .map(|alt| Pattern::new(alt).map_err(|e| fail(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { negated, patterns })
    }

    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Match a `/`-separated path relative to the project root.
    pub fn is_match(&self, relative: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(relative, MATCH_OPTIONS))
    }
}

/// Expand `{a,b}` alternations (nesting allowed) into plain patterns.
fn expand_braces(pattern: &str) -> Result<Vec<String>, &'static str> {
    let Some(open) = pattern.find('{') else {
        if pattern.contains('}') {
            return Err("unmatched `}`");
        }
        return Ok(vec![pattern.to_string()]);
    };
    if pattern[..open].contains('}') {
        return Err("unmatched `}`");
    }

    let mut depth = 0usize;
    let mut bounds = vec![open];
    let mut close = None;
    for (i, c) in pattern.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(i),
            _ => {}
        }
    }
    let close = close.ok_or("unclosed `{`")?;
    bounds.push(close);

    let (prefix, suffix) = (&pattern[..open], &pattern[close + 1..]);
    let mut out = Vec::new();
    for pair in bounds.windows(2) {
        let alt = &pattern[pair[0] + 1..pair[1]];
        out.extend(expand_braces(&format!("{prefix}{alt}{suffix}"))?);
    }
    Ok(out)
}
