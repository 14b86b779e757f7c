use std::fmt;

/// A git tag peeled to the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_id: String,
    /// Whether the name satisfies the configured tag filter
    pub matches_pattern: bool,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>, matches_pattern: bool) -> Self {
        Tag {
            name: name.into(),
            commit_id: commit_id.into(),
            matches_pattern,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag {} ({})", self.name, super::short_id(&self.commit_id))
    }
}
