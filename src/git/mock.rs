use std::cell::Cell;

use crate::domain::{Commit, Modification, Tag};
use crate::error::Result;
use crate::git::{Entries, Repository};

/// In-memory repository for testing without actual git operations
///
/// Commits are kept newest first, the order the resolver walks them in.
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: Vec<(String, String)>,
    modifications: Vec<Modification>,
    pulled: Cell<usize>,
}

struct MockCommit {
    id: String,
    message: String,
    paths: Vec<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of the current head and return its id
    pub fn commit(&mut self, message: &str) -> String {
        self.commit_paths(message, &[])
    }

    /// Add a commit that changes the given paths
    pub fn commit_paths(&mut self, message: &str, paths: &[&str]) -> String {
        let id = format!("{:040x}", self.commits.len() + 1);
        self.commits.insert(
            0,
            MockCommit {
                id: id.clone(),
                message: message.to_string(),
                paths: paths.iter().map(|p| p.to_string()).collect(),
            },
        );
        id
    }

    /// Add a tag pointing to a commit id
    pub fn tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.push((name.into(), commit_id.into()));
    }

    /// Tag the current head
    pub fn tag_head(&mut self, name: impl Into<String>) {
        let head = self
            .commits
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_default();
        self.tag(name, head);
    }

    /// Record an uncommitted change
    pub fn modify(&mut self, modification: Modification) {
        self.modifications.push(modification);
    }

    /// How many commits consumers have pulled from [Repository::commits] so far
    pub fn commits_pulled(&self) -> usize {
        self.pulled.get()
    }
}

impl Repository for MockRepository {
    fn tags<'a>(&'a self, matcher: &'a dyn Fn(&str) -> bool) -> Result<Entries<'a, Tag>> {
        Ok(Box::new(self.tags.iter().map(move |(name, commit_id)| {
            Ok(Tag::new(name.clone(), commit_id.clone(), matcher(name)))
        })))
    }

    fn commits<'a>(&'a self, directory: Option<&'a str>) -> Result<Entries<'a, Commit>> {
        let prefix = directory.map(|d| format!("{}/", d.trim_end_matches('/')));

        Ok(Box::new(self.commits.iter().map(move |commit| {
            self.pulled.set(self.pulled.get() + 1);
            let matches = match &prefix {
                Some(prefix) => commit.paths.iter().any(|p| p.starts_with(prefix.as_str())),
                None => true,
            };
            Ok(Commit::new(commit.id.clone(), &commit.message, matches))
        })))
    }

    fn modifications<'a>(&'a self) -> Result<Entries<'a, Modification>> {
        Ok(Box::new(self.modifications.iter().cloned().map(Ok)))
    }

    fn head_id(&self) -> Result<Option<String>> {
        Ok(self.commits.first().map(|c| c.id.clone()))
    }
}
