//! Pattern table mapping locators to caller-defined match codes.
//!
//! # Invariants
//! - Entries are tried in registration order; the first match wins.
//! - `#` matches one all-digit segment, `*` matches any one segment.

use super::{ContentUri, RouteError, RouteResult};
use regex::Regex;

#[derive(Debug, Clone)]
struct Entry<C> {
    pattern: Regex,
    code: C,
}

/// Explicitly constructed routing table.
#[derive(Debug, Clone)]
pub struct UriMatcher<C> {
    entries: Vec<Entry<C>>,
}

impl<C: Copy> Default for UriMatcher<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<C: Copy> UriMatcher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` under `authority`, returning `code` on match.
    pub fn add_uri(&mut self, authority: &str, path: &str, code: C) -> RouteResult<()> {
        let mut source = format!("^{}", regex::escape(authority));
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            source.push('/');
            match segment {
                "#" => source.push_str("[0-9]+"),
                "*" => source.push_str("[^/]+"),
                literal => source.push_str(&regex::escape(literal)),
            }
        }
        source.push('$');

        let pattern = Regex::new(&source).map_err(|err| RouteError::InvalidPattern {
            pattern: format!("{authority}/{path}"),
            message: err.to_string(),
        })?;
        self.entries.push(Entry { pattern, code });
        Ok(())
    }

    /// Builder-style `add_uri`.
    pub fn with_uri(mut self, authority: &str, path: &str, code: C) -> RouteResult<Self> {
        self.add_uri(authority, path, code)?;
        Ok(self)
    }

    pub fn match_uri(&self, uri: &ContentUri) -> Option<C> {
        let mut target = uri.authority().to_string();
        for segment in uri.path_segments() {
            target.push('/');
            target.push_str(segment);
        }

        self.entries
            .iter()
            .find(|entry| entry.pattern.is_match(&target))
            .map(|entry| entry.code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
