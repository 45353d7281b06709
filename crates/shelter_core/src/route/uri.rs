//! `content://` resource locators.

use super::{RouteError, RouteResult};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const SCHEME: &str = "content";

/// Parsed `content://<authority>/<segment>/...` locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentUri {
    authority: String,
    segments: Vec<String>,
}

impl ContentUri {
    /// Builds a locator from an authority and a `/`-separated path.
    pub fn new(authority: impl Into<String>, path: &str) -> RouteResult<Self> {
        let authority = authority.into();
        validate_authority(&authority, &authority)?;
        Ok(Self {
            authority,
            segments: split_path(path),
        })
    }

    /// Parses a full locator string.
    ///
    /// Query strings and fragments are not part of the locator scheme and are
    /// rejected.
    pub fn parse(raw: &str) -> RouteResult<Self> {
        let rest = raw
            .strip_prefix(SCHEME)
            .and_then(|rest| rest.strip_prefix("://"))
            .ok_or_else(|| RouteError::InvalidUri {
                uri: raw.to_string(),
                reason: "expected `content://` scheme",
            })?;

        if rest.contains(['?', '#']) {
            return Err(RouteError::InvalidUri {
                uri: raw.to_string(),
                reason: "query and fragment components are not supported",
            });
        }

        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        validate_authority(authority, raw)?;

        Ok(Self {
            authority: authority.to_string(),
            segments: split_path(path),
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    /// Path without leading slash, e.g. `pets/3`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Returns a copy with `id` appended as a new trailing segment.
    pub fn with_appended_id(&self, id: i64) -> Self {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self {
            authority: self.authority.clone(),
            segments,
        }
    }

    /// Reads the last path segment as a row id.
    pub fn parse_id(&self) -> Option<i64> {
        self.segments.last()?.parse().ok()
    }
}

impl Display for ContentUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SCHEME}://{}", self.authority)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for ContentUri {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_authority(authority: &str, raw: &str) -> RouteResult<()> {
    if authority.is_empty() {
        return Err(RouteError::InvalidUri {
            uri: raw.to_string(),
            reason: "authority cannot be empty",
        });
    }
    if authority.contains(char::is_whitespace) {
        return Err(RouteError::InvalidUri {
            uri: raw.to_string(),
            reason: "authority cannot contain whitespace",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ContentUri;
    use crate::route::RouteError;

    #[test]
    fn parse_splits_authority_and_segments() {
        let uri = ContentUri::parse("content://com.example.android.pets/pets/12")
            .expect("item locator should parse");
        assert_eq!(uri.authority(), "com.example.android.pets");
        assert_eq!(uri.path_segments(), ["pets", "12"]);
        assert_eq!(uri.parse_id(), Some(12));
        assert_eq!(uri.to_string(), "content://com.example.android.pets/pets/12");
    }

    #[test]
    fn parse_ignores_empty_segments() {
        let uri =
            ContentUri::parse("content://shelter//pets/").expect("empty segments are skipped");
        assert_eq!(uri.path(), "pets");
        assert_eq!(uri.parse_id(), None);
    }

    #[test]
    fn parse_rejects_other_schemes_and_queries() {
        for raw in [
            "http://shelter/pets",
            "content:/shelter/pets",
            "content:///pets",
            "content://shelter/pets?limit=1",
            "content://shelter/pets#top",
        ] {
            let err = ContentUri::parse(raw).unwrap_err();
            assert!(matches!(err, RouteError::InvalidUri { .. }), "{raw}");
        }
    }

    #[test]
    fn appended_id_becomes_last_segment() {
        let base = ContentUri::new("shelter", "pets").expect("base locator");
        let item = base.with_appended_id(7);
        assert_eq!(item.to_string(), "content://shelter/pets/7");
        assert_eq!(item.parse_id(), Some(7));
        assert_eq!(base.parse_id(), None);
    }
}
