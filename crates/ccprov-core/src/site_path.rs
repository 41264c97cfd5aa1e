// Slash-separated site hierarchy paths (`Global/United States/Campus`).

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Position of a site in the hierarchy, root first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SitePath {
    segments: Vec<String>,
}

impl SitePath {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let segments: Vec<String> = raw
            .trim()
            .trim_matches('/')
            .split('/')
            .map(|s| s.trim().to_owned())
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(CoreError::InvalidSitePath {
                input: raw.to_owned(),
            });
        }
        Ok(Self { segments })
    }

    /// Path of a child site named `name` under this one.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_owned());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment.
    pub fn name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Every segment except the last.
    pub fn parent(&self) -> &[String] {
        self.segments
            .split_last()
            .map_or(&[][..], |(_, parent)| parent)
    }

    /// Number of separators: `Global` is 0, an area under it is 1.
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// True when this path's parent ends with `ancestor`'s segments.
    ///
    /// Both a full parent path and a bare parent name match, so
    /// `Global/US/Campus/Tower/FLOOR_1` is under `Tower` and under
    /// `Global/US/Campus/Tower`, but not under `Other Tower`.
    pub fn is_under(&self, ancestor: &SitePath) -> bool {
        self.parent().ends_with(&ancestor.segments)
    }
}

impl FromStr for SitePath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SitePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
