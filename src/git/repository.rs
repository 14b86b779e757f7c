use std::collections::BTreeSet;
use std::path::Path;

use git2::{
    DiffOptions, ErrorClass, ErrorCode, ObjectType, Oid, Repository as Git2Repo, Sort, Status,
    StatusOptions,
};
use log::debug;

use crate::domain::{Commit, Modification, ModificationStatus, Tag};
use crate::error::{GitVersionError, Result};
use crate::git::Entries;

/// Wrapper around git2::Repository with our trait interface
///
/// The underlying libgit2 handle is released when the wrapper is dropped, so
/// every exit path of a run closes the repository exactly once.
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository whose root is `path`
    ///
    /// Parent directories are not searched.
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - The opened repository
    /// * `Err` - [GitVersionError::RepositoryNotFound] if `path` is not a repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|source| GitVersionError::RepositoryNotFound {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Opened repository at {}", path.display());

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Release the repository handle
    pub fn close(self) {
        debug!("Closing repository at {}", self.repo.path().display());
    }

    fn head_oid(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether `commit` changed anything matching `pathspec` relative to its first parent
    fn touches(&self, commit: &git2::Commit<'_>, pathspec: &str) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut options = DiffOptions::new();
        options.pathspec(pathspec);
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut options))?;

        Ok(diff.deltas().len() > 0)
    }
}

impl super::Repository for Git2Repository {
    fn tags<'a>(&'a self, matcher: &'a dyn Fn(&str) -> bool) -> Result<Entries<'a, Tag>> {
        let references = self.repo.references_glob("refs/tags/*")?;

        Ok(Box::new(references.filter_map(move |reference| {
            let reference = match reference {
                Ok(reference) => reference,
                Err(e) => return Some(Err(e.into())),
            };
            let name = reference.name()?.strip_prefix("refs/tags/")?.to_string();

            match reference.peel(ObjectType::Commit) {
                Ok(target) => {
                    let matches = matcher(&name);
                    Some(Ok(Tag::new(name, target.id().to_string(), matches)))
                }
                Err(e) if is_unpeelable(&e) => {
                    debug!("Skipping tag {} which does not point at a commit", name);
                    None
                }
                Err(e) => Some(Err(e.into())),
            }
        })))
    }

    fn commits<'a>(&'a self, directory: Option<&'a str>) -> Result<Entries<'a, Commit>> {
        let Some(head) = self.head_oid()? else {
            return Ok(Box::new(std::iter::empty()));
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(head)?;

        let pathspec = directory.map(|d| format!("{}/*", d.trim_end_matches('/')));

        Ok(Box::new(revwalk.map(move |oid| -> Result<Commit> {
            let commit = self.repo.find_commit(oid?)?;
            let matches_path_filter = match &pathspec {
                Some(pathspec) => self.touches(&commit, pathspec)?,
                None => true,
            };
            let message = String::from_utf8_lossy(commit.message_bytes());

            Ok(Commit::new(
                commit.id().to_string(),
                &message,
                matches_path_filter,
            ))
        })))
    }

    fn modifications<'a>(&'a self) -> Result<Entries<'a, Modification>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(Box::new(
            (0..statuses.len())
                .filter_map(move |index| {
                    let entry = statuses.get(index)?;
                    let status = modification_status(entry.status());
                    if status.is_empty() {
                        return None;
                    }
                    let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                    Some(Modification::new(path, status))
                })
                .map(Ok),
        ))
    }

    fn head_id(&self) -> Result<Option<String>> {
        Ok(self.head_oid()?.map(|oid| oid.to_string()))
    }
}

fn is_unpeelable(e: &git2::Error) -> bool {
    matches!(
        e.code(),
        ErrorCode::Peel | ErrorCode::InvalidSpec | ErrorCode::NotFound
    ) || e.class() == ErrorClass::Object
}

/// Translate libgit2 status bits into named flags; ignored entries map to an empty set
pub fn modification_status(status: Status) -> BTreeSet<ModificationStatus> {
    let mut flags = BTreeSet::new();
    if status.contains(Status::IGNORED) {
        return flags;
    }

    let mapping = [
        (Status::INDEX_NEW | Status::WT_NEW, ModificationStatus::New),
        (
            Status::INDEX_MODIFIED | Status::WT_MODIFIED | Status::CONFLICTED,
            ModificationStatus::Modified,
        ),
        (Status::INDEX_DELETED | Status::WT_DELETED, ModificationStatus::Deleted),
        (Status::INDEX_RENAMED | Status::WT_RENAMED, ModificationStatus::Renamed),
        (
            Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE,
            ModificationStatus::TypeChange,
        ),
    ];
    for (bits, flag) in mapping {
        if status.intersects(bits) {
            flags.insert(flag);
        }
    }
    flags
}
