//! Compiled regular expressions and structured access to their capture groups.
//!
//! Every configured pattern is compiled once with "dot matches newline"
//! enabled. A [Pattern] can be used either as a search (the expression may
//! match anywhere in the text) or as a whole-string match, which is what
//! commit message rules and tag anchoring use.

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{GitVersionError, Result};

/// A user supplied regular expression, compiled for search and for whole-string matching
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    search: Regex,
    entire: Regex,
}

impl Pattern {
    /// Compile a pattern
    ///
    /// # Returns
    /// * `Ok(Pattern)` - The compiled pattern
    /// * `Err` - [GitVersionError::Pattern] if the expression is invalid
    pub fn compile(source: &str) -> Result<Self> {
        let search = build(source)?;
        let entire = build(&format!("^(?:{})$", source))?;

        Ok(Pattern {
            source: source.to_string(),
            search,
            entire,
        })
    }

    /// Compile an optional pattern, treating an empty string as "not configured"
    pub fn compile_optional(source: Option<&str>) -> Result<Option<Self>> {
        match source {
            Some(source) if !source.is_empty() => Ok(Some(Self::compile(source)?)),
            _ => Ok(None),
        }
    }

    /// The expression as it was configured
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the expression matches anywhere in `text`
    pub fn is_found_in(&self, text: &str) -> bool {
        self.search.is_match(text)
    }

    /// Match the expression against the whole of `text`
    pub fn match_entire<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        self.entire
            .captures(text)
            .map(|captures| PatternMatch { captures })
    }
}

fn build(source: &str) -> Result<Regex> {
    RegexBuilder::new(source)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| GitVersionError::pattern(format!("Invalid pattern '{}': {}", source, e)))
}

/// A successful whole-string match with positional, possibly absent groups
#[derive(Debug)]
pub struct PatternMatch<'t> {
    captures: Captures<'t>,
}

impl<'t> PatternMatch<'t> {
    /// The full matched text
    pub fn value(&self) -> &'t str {
        self.captures.get(0).map(|m| m.as_str()).unwrap_or_default()
    }

    /// Number of capture groups in the expression, not counting the whole match
    pub fn group_count(&self) -> usize {
        self.captures.len() - 1
    }

    /// Text captured by group `index`, or `None` if the group did not participate
    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.captures.get(index).map(|m| m.as_str())
    }

    /// The version text carried by a tag name
    ///
    /// This is group 1 when the expression declares groups (empty if the group
    /// did not participate) and the whole match otherwise.
    pub fn version_text(&self) -> &'t str {
        if self.group_count() >= 1 {
            self.group(1).unwrap_or_default()
        } else {
            self.value()
        }
    }

    /// Group `index` read as a version number
    ///
    /// A missing or empty group counts as `0`.
    ///
    /// # Returns
    /// * `Err` - [GitVersionError::Pattern] if the group holds something that
    ///   is not a non-negative integer fitting in 64 bits
    pub fn number(&self, index: usize) -> Result<u64> {
        match self.group(index) {
            None | Some("") => Ok(0),
            Some(text) => text.parse::<u64>().map_err(|e| {
                GitVersionError::pattern(format!(
                    "Captured group {} '{}' of '{}' is not a version number: {}",
                    index,
                    text,
                    self.value(),
                    e
                ))
            }),
        }
    }
}
