use std::collections::BTreeSet;
use std::fmt;

/// Kind of change recorded for a path in the index or working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModificationStatus {
    New,
    Modified,
    Deleted,
    Renamed,
    TypeChange,
}

impl fmt::Display for ModificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModificationStatus::New => "NEW",
            ModificationStatus::Modified => "MODIFIED",
            ModificationStatus::Deleted => "DELETED",
            ModificationStatus::Renamed => "RENAMED",
            ModificationStatus::TypeChange => "TYPECHANGE",
        };
        f.write_str(name)
    }
}

/// An uncommitted, non-ignored change in the checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    pub path: String,
    pub status: BTreeSet<ModificationStatus>,
}

impl Modification {
    pub fn new(path: impl Into<String>, status: impl IntoIterator<Item = ModificationStatus>) -> Self {
        Modification {
            path: path.into(),
            status: status.into_iter().collect(),
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status: Vec<String> = self.status.iter().map(|s| s.to_string()).collect();
        write!(f, "{} [{}]", self.path, status.join(", "))
    }
}
