use std::fmt;

use log::info;

use super::{Commit, Tag, Version, VersionBump};
use crate::error::Result;

/// What caused a ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeReason {
    Tag(Tag),
    Commit(Commit),
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeReason::Tag(tag) => fmt::Display::fmt(tag, f),
            ChangeReason::Commit(commit) => fmt::Display::fmt(commit, f),
        }
    }
}

/// One entry of the ledger; `modification` is `None` for a visited commit with no effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub reason: ChangeReason,
    pub modification: Option<VersionBump>,
}

impl VersionChange {
    pub fn tag(tag: Tag, bump: VersionBump) -> Self {
        VersionChange {
            reason: ChangeReason::Tag(tag),
            modification: Some(bump),
        }
    }

    pub fn commit(commit: Commit, bump: Option<VersionBump>) -> Self {
        VersionChange {
            reason: ChangeReason::Commit(commit),
            modification: bump,
        }
    }
}

/// Version changes collected newest first during the commit walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    changes: Vec<VersionChange>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next (older) change
    pub fn push(&mut self, change: VersionChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Entries in walk order, newest first
    pub fn changes(&self) -> &[VersionChange] {
        &self.changes
    }

    /// Apply all entries oldest first to a zero version
    ///
    /// Returns `Ok(None)` when nothing was recorded, and an error when a
    /// version component overflows.
    pub fn fold(&self) -> Result<Option<Version>> {
        if self.changes.is_empty() {
            return Ok(None);
        }

        let mut version = Version::default();
        for change in self.changes.iter().rev() {
            if let Some(bump) = &change.modification {
                version.apply(bump)?;
            }
            info!("Set version to {} due to {}", version, change.reason);
        }
        Ok(Some(version))
    }
}
