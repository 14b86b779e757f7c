use std::collections::HashMap;

use log::{debug, info, warn};

use crate::domain::{short_id, Ledger, Overrides, Tag, VersionBump, VersionChange};
use crate::error::{GitVersionError, Result};
use crate::git::Repository;
use crate::pattern::Pattern;
use crate::resolver::{Resolution, ResolverOptions};

/// Computes a version from a repository
///
/// Rule priority is fixed: an anchor tag beats the major, minor and patch
/// message patterns, in that order.
pub struct VersionResolver {
    version: Pattern,
    tag: Option<Pattern>,
    major: Option<Pattern>,
    minor: Option<Pattern>,
    patch: Option<Pattern>,
    directory: Option<String>,
    dirty_ignore: bool,
    dirty_suffix: Option<String>,
    overrides: Overrides,
    append_hash: bool,
}

impl VersionResolver {
    /// Compile all patterns and apply the component prefix
    ///
    /// # Returns
    /// * `Err` - [GitVersionError::Pattern] if any expression is invalid
    pub fn new(options: &ResolverOptions) -> Result<Self> {
        Ok(VersionResolver {
            version: Pattern::compile(&options.version_pattern)?,
            tag: Pattern::compile_optional(options.effective_tag_pattern().as_deref())?,
            major: Pattern::compile_optional(options.major_pattern.as_deref())?,
            minor: Pattern::compile_optional(options.minor_pattern.as_deref())?,
            patch: Pattern::compile_optional(options.patch_pattern.as_deref())?,
            directory: options.effective_directory(),
            dirty_ignore: options.dirty_ignore,
            dirty_suffix: options.dirty_suffix.clone().filter(|s| !s.is_empty()),
            overrides: options.overrides.clone(),
            append_hash: options.append_hash,
        })
    }

    /// Resolve the version of `repo`
    ///
    /// # Returns
    /// * `Ok(Resolution)` - Final version plus the ledger it was folded from
    /// * `Err` - [GitVersionError::NoHistory] if the walk recorded nothing,
    ///   [GitVersionError::Git] on any repository failure
    pub fn resolve<R: Repository>(&self, repo: &R) -> Result<Resolution> {
        let tags = self.index_tags(repo)?;
        let ledger = self.walk(repo, &tags)?;

        info!("Applying changes");
        let mut version = ledger.fold()?.ok_or(GitVersionError::NoHistory)?;

        let dirty = !self.dirty_ignore && self.is_dirty(repo)?;
        if dirty {
            version = version.dirty(self.dirty_suffix.as_deref())?;
            info!(
                "Set version to {} due to uncommitted modifications",
                version
            );
        }

        if !self.overrides.is_empty() {
            version = version.overridden(&self.overrides);
            info!("Set version to {} due to overrides", version);
        }

        let build = if self.append_hash {
            repo.head_id()?.map(|id| short_id(&id).to_string())
        } else {
            None
        };

        Ok(Resolution {
            version,
            build,
            dirty,
            ledger,
        })
    }

    /// Group all tags by the commit they point at
    fn index_tags<R: Repository>(&self, repo: &R) -> Result<HashMap<String, Vec<Tag>>> {
        debug!("Searching for tags");
        let matcher = |name: &str| {
            self.tag
                .as_ref()
                .map_or(true, |pattern| pattern.is_found_in(name))
        };

        let mut index: HashMap<String, Vec<Tag>> = HashMap::new();
        for tag in repo.tags(&matcher)? {
            let tag = tag?;
            debug!("  Found {}", tag);
            index.entry(tag.commit_id.clone()).or_default().push(tag);
        }
        if index.is_empty() {
            debug!("  No tags found");
        }
        Ok(index)
    }

    /// Walk history from head, newest first, until exhausted or anchored
    fn walk<R: Repository>(&self, repo: &R, tags: &HashMap<String, Vec<Tag>>) -> Result<Ledger> {
        debug!("Searching for commits");
        let mut ledger = Ledger::new();
        let mut found = false;

        for commit in repo.commits(self.directory.as_deref())? {
            let commit = commit?;
            found = true;
            debug!("  Found {}", commit);

            if let Some(anchor) = self.anchor(tags.get(&commit.id))? {
                debug!("  Reached {}", anchor.reason);
                ledger.push(anchor);
                break;
            }

            if commit.matches_path_filter {
                let bump = self.classify(&commit.message);
                ledger.push(VersionChange::commit(commit, bump));
            }
        }

        if !found {
            debug!("  No commits found");
        }
        Ok(ledger)
    }

    /// First tag of a commit that seeds the version, if any
    fn anchor(&self, tags: Option<&Vec<Tag>>) -> Result<Option<VersionChange>> {
        let Some(tag_pattern) = &self.tag else {
            return Ok(None);
        };

        for tag in tags.into_iter().flatten() {
            if !tag.matches_pattern {
                continue;
            }
            let Some(tag_match) = tag_pattern.match_entire(&tag.name) else {
                continue;
            };
            let text = tag_match.version_text();
            // `\d` also matches non-ASCII digits, which never form a version number
            let Some(parts) = self
                .version
                .match_entire(text)
                .filter(|parts| parts.value().is_ascii())
            else {
                warn!(
                    "Ignoring {}: '{}' does not match version pattern '{}'",
                    tag,
                    text,
                    self.version.as_str()
                );
                continue;
            };

            let bump = VersionBump::Anchor {
                major: parts.number(1)?,
                minor: parts.number(2)?,
                patch: parts.number(3)?,
            };
            return Ok(Some(VersionChange::tag(tag.clone(), bump)));
        }
        Ok(None)
    }

    /// Bump for a commit message; major, then minor, then patch, first match wins
    fn classify(&self, message: &str) -> Option<VersionBump> {
        [
            (&self.major, VersionBump::Major),
            (&self.minor, VersionBump::Minor),
            (&self.patch, VersionBump::Patch),
        ]
        .into_iter()
        .find_map(|(pattern, bump)| {
            let pattern = pattern.as_ref()?;
            pattern.match_entire(message).map(|_| bump)
        })
    }

    /// Whether the checkout has at least one uncommitted change; stops at the first one
    fn is_dirty<R: Repository>(&self, repo: &R) -> Result<bool> {
        debug!("Check for modifications");
        match repo.modifications()?.next().transpose()? {
            Some(modification) => {
                debug!("  Found {}", modification);
                Ok(true)
            }
            None => {
                debug!("  No modification found");
                Ok(false)
            }
        }
    }
}
