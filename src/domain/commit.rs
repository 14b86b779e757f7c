use std::fmt;

/// One node of the commit walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    /// First line of the commit message
    pub message: String,
    /// Whether the commit touches the configured directory (always true without a filter)
    pub matches_path_filter: bool,
}

impl Commit {
    /// Create a commit, keeping only the first line of `message`
    pub fn new(id: impl Into<String>, message: &str, matches_path_filter: bool) -> Self {
        Commit {
            id: id.into(),
            message: first_line(message).to_string(),
            matches_path_filter,
        }
    }
}

/// First line of a commit message, without the line terminator
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "commit {} \"{}\"", super::short_id(&self.id), self.message)
    }
}
