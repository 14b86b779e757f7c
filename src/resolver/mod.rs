//! Version resolution engine: turns tags, commits and working tree status into a version

pub mod version_resolver;

pub use version_resolver::VersionResolver;

use std::fmt;

use crate::domain::{Ledger, Overrides, Version};

/// Default expression reading up to three dot separated numbers
pub const DEFAULT_VERSION_PATTERN: &str = r"(\d+)(?:[.](\d+)(?:[.](\d+))?)?";
/// Default expression selecting version tags and capturing their version text
pub const DEFAULT_TAG_PATTERN: &str = "v(.+)";
/// Default commit message expression for patch increments; matches every message
pub const DEFAULT_PATCH_PATTERN: &str = ".+";
/// Default suffix for versions computed from a dirty working tree
pub const DEFAULT_DIRTY_SUFFIX: &str = "SNAPSHOT";

/// Everything the resolver needs to know, as plain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub version_pattern: String,
    pub tag_pattern: Option<String>,
    pub major_pattern: Option<String>,
    pub minor_pattern: Option<String>,
    pub patch_pattern: Option<String>,
    pub directory: Option<String>,
    pub component: Option<String>,
    pub dirty_ignore: bool,
    pub dirty_suffix: Option<String>,
    pub overrides: Overrides,
    pub append_hash: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            tag_pattern: Some(DEFAULT_TAG_PATTERN.to_string()),
            major_pattern: None,
            minor_pattern: None,
            patch_pattern: Some(DEFAULT_PATCH_PATTERN.to_string()),
            directory: None,
            component: None,
            dirty_ignore: false,
            dirty_suffix: Some(DEFAULT_DIRTY_SUFFIX.to_string()),
            overrides: Overrides::default(),
            append_hash: false,
        }
    }
}

impl ResolverOptions {
    fn component(&self) -> Option<&str> {
        self.component.as_deref().filter(|c| !c.is_empty())
    }

    /// Tag pattern with the component prefix applied: `{component}-{tag_pattern}`
    pub fn effective_tag_pattern(&self) -> Option<String> {
        let pattern = self.tag_pattern.as_deref().filter(|p| !p.is_empty())?;
        match self.component() {
            Some(component) => Some(format!("{}-{}", component, pattern)),
            None => Some(pattern.to_string()),
        }
    }

    /// Directory filter with the component applied: `{component}/{directory}`, or just `component`
    pub fn effective_directory(&self) -> Option<String> {
        let directory = self.directory.as_deref().filter(|d| !d.is_empty());
        match (self.component(), directory) {
            (Some(component), Some(directory)) => Some(format!("{}/{}", component, directory)),
            (Some(component), None) => Some(component.to_string()),
            (None, directory) => directory.map(str::to_string),
        }
    }
}

/// Outcome of one resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: Version,
    /// Abbreviated head commit id, appended as build metadata
    pub build: Option<String>,
    pub dirty: bool,
    pub ledger: Ledger,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::default();
        assert_eq!(options.effective_tag_pattern(), Some("v(.+)".to_string()));
        assert_eq!(options.effective_directory(), None);
        assert_eq!(options.dirty_suffix.as_deref(), Some("SNAPSHOT"));
    }

    #[test]
    fn test_component_composition() {
        let mut options = ResolverOptions {
            component: Some("component".to_string()),
            ..ResolverOptions::default()
        };
        assert_eq!(
            options.effective_tag_pattern(),
            Some("component-v(.+)".to_string())
        );
        assert_eq!(options.effective_directory(), Some("component".to_string()));

        options.directory = Some("sub".to_string());
        options.tag_pattern = Some("x(.+)".to_string());
        assert_eq!(
            options.effective_tag_pattern(),
            Some("component-x(.+)".to_string())
        );
        assert_eq!(
            options.effective_directory(),
            Some("component/sub".to_string())
        );
    }

    #[test]
    fn test_empty_values_are_unset() {
        let options = ResolverOptions {
            tag_pattern: Some(String::new()),
            component: Some(String::new()),
            directory: Some(String::new()),
            ..ResolverOptions::default()
        };
        assert_eq!(options.effective_tag_pattern(), None);
        assert_eq!(options.effective_directory(), None);
    }

    #[test]
    fn test_resolution_display() {
        let mut resolution = Resolution {
            version: Version::new(1, 0, 1),
            build: None,
            dirty: false,
            ledger: Ledger::new(),
        };
        assert_eq!(resolution.to_string(), "1.0.1");

        resolution.version.suffix = Some("SNAPSHOT".to_string());
        resolution.build = Some("0123abcd".to_string());
        assert_eq!(resolution.to_string(), "1.0.1-SNAPSHOT+0123abcd");
    }
}
