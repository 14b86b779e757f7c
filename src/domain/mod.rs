//! Domain logic - pure version rules independent of git operations

pub mod change;
pub mod commit;
pub mod modification;
pub mod tag;
pub mod version;

pub use change::{ChangeReason, Ledger, VersionChange};
pub use commit::Commit;
pub use modification::{Modification, ModificationStatus};
pub use tag::Tag;
pub use version::{Overrides, Version, VersionBump};

/// Length of an abbreviated commit id
pub const SHORT_ID_LEN: usize = 8;

/// Abbreviate a hexadecimal object id
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}
