use std::fmt;

use crate::error::{GitVersionError, Result};

/// Semantic version accumulator and result
///
/// Text form is `major.minor.patch`, followed by `-suffix` when a suffix is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: Option<String>,
}

impl Version {
    /// Create a new version without suffix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            suffix: None,
        }
    }

    /// Apply a bump in place
    ///
    /// # Returns
    /// * `Err` - [GitVersionError::Pattern] if a component would exceed `u64`
    pub fn apply(&mut self, bump: &VersionBump) -> Result<()> {
        match *bump {
            VersionBump::Anchor {
                major,
                minor,
                patch,
            } => {
                self.major = increment(self.major, major)?;
                self.minor = increment(self.minor, minor)?;
                self.patch = increment(self.patch, patch)?;
            }
            VersionBump::Major => {
                self.major = increment(self.major, 1)?;
                self.minor = 0;
                self.patch = 0;
            }
            VersionBump::Minor => {
                self.minor = increment(self.minor, 1)?;
                self.patch = 0;
            }
            VersionBump::Patch => {
                self.patch = increment(self.patch, 1)?;
            }
        }
        Ok(())
    }

    /// Version for a working tree with uncommitted modifications
    ///
    /// Adds one patch increment. The suffix is replaced only when a non-empty
    /// `dirty_suffix` is given.
    pub fn dirty(mut self, dirty_suffix: Option<&str>) -> Result<Self> {
        self.patch = increment(self.patch, 1)?;
        if let Some(suffix) = dirty_suffix.filter(|s| !s.is_empty()) {
            self.suffix = Some(suffix.to_string());
        }
        Ok(self)
    }

    /// Replace every field that has an explicit override
    pub fn overridden(self, overrides: &Overrides) -> Self {
        Version {
            major: overrides.major.unwrap_or(self.major),
            minor: overrides.minor.unwrap_or(self.minor),
            patch: overrides.patch.unwrap_or(self.patch),
            suffix: overrides.suffix.clone().or(self.suffix),
        }
    }
}

fn increment(value: u64, by: u64) -> Result<u64> {
    value.checked_add(by).ok_or_else(|| {
        GitVersionError::pattern(format!(
            "Version component {} overflows when adding {}",
            value, by
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

/// Effect of one ledger entry on the version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// Seed from an anchor tag; the captured numbers are added
    Anchor { major: u64, minor: u64, patch: u64 },
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Anchor {
                major,
                minor,
                patch,
            } => write!(f, "anchor {}.{}.{}", major, minor, patch),
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// Explicit values that win over everything computed from history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub suffix: Option<String>,
}

impl Overrides {
    /// Whether any override was supplied
    pub fn is_empty(&self) -> bool {
        self.major.is_none() && self.minor.is_none() && self.patch.is_none() && self.suffix.is_none()
    }
}
