//! Git access abstraction layer
//!
//! This module provides a trait-based abstraction over the repository reads
//! the version resolver needs, allowing for multiple implementations
//! including real Git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Every enumeration is returned as a lazy iterator. Consumers stop pulling
//! whenever they have seen enough, which stops the underlying traversal; no
//! explicit cancellation is needed.
//!
//! ```rust
//! # use gitversion::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gitversion::Result<()> {
//! // Only the first modification is ever read.
//! let dirty = repo.modifications()?.next().transpose()?.is_some();
//! # let _ = dirty;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, Modification, Tag};
use crate::error::Result;

/// Lazy, fallible sequence produced by a [Repository]
pub type Entries<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Read access to a repository, as consumed by the version resolver
///
/// ## Error Handling
///
/// Implementations map lookup and diff failures to
/// [crate::error::GitVersionError::Git]. Nothing is retried; the first error
/// ends the sequence for the consumer.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with scripted history
pub trait Repository {
    /// Enumerate all tags, peeled to their commits
    ///
    /// The order is unspecified. `matcher` decides
    /// [Tag::matches_pattern] for each name but does not filter the sequence.
    fn tags<'a>(&'a self, matcher: &'a dyn Fn(&str) -> bool) -> Result<Entries<'a, Tag>>;

    /// Walk commits from the current head following parent edges
    ///
    /// When `directory` is set, [Commit::matches_path_filter] tells whether the
    /// commit changed anything below that directory compared to its first
    /// parent. An empty repository yields an empty sequence.
    fn commits<'a>(&'a self, directory: Option<&'a str>) -> Result<Entries<'a, Commit>>;

    /// Enumerate uncommitted, non-ignored changes in the index and working tree
    fn modifications<'a>(&'a self) -> Result<Entries<'a, Modification>>;

    /// Full id of the commit at the current head, `None` for an empty repository
    fn head_id(&self) -> Result<Option<String>>;
}
