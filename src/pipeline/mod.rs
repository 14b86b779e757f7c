//! Publishing the resolved version into CI pipelines
//!
//! Each [Modifier] inspects the environment through a [PipelineContext] and
//! decides on its own whether it runs inside its pipeline. Modifiers never
//! fail a run: an I/O error is logged and the modifier counts as not applied.

pub mod azure;
pub mod github;
pub mod gitlab;

use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Name of the variable carrying the resolved version
pub const VERSION_VARIABLE: &str = "VERSION";
/// Dotenv file written for GitLab when nothing else is configured
pub const DEFAULT_GITLAB_DOTENV: &str = "build.env";

/// Which modifiers to consult
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PipelineSelection {
    /// Try every modifier
    #[default]
    Auto,
    /// Do not publish anywhere
    None,
    Azure,
    Github,
    Gitlab,
}

impl PipelineSelection {
    fn includes(self, name: &str) -> bool {
        match self {
            PipelineSelection::Auto => true,
            PipelineSelection::None => false,
            selected => selected.to_string() == name,
        }
    }
}

impl fmt::Display for PipelineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineSelection::Auto => "auto",
            PipelineSelection::None => "none",
            PipelineSelection::Azure => "azure",
            PipelineSelection::Github => "github",
            PipelineSelection::Gitlab => "gitlab",
        };
        f.write_str(name)
    }
}

/// Modifier specific settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineParams {
    pub gitlab_dotenv: PathBuf,
}

impl Default for PipelineParams {
    fn default() -> Self {
        PipelineParams {
            gitlab_dotenv: PathBuf::from(DEFAULT_GITLAB_DOTENV),
        }
    }
}

/// Everything a modifier may read or write
pub struct PipelineContext<'a> {
    pub env: &'a dyn Fn(&str) -> Option<String>,
    pub variables: &'a BTreeMap<String, String>,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub params: &'a PipelineParams,
}

impl PipelineContext<'_> {
    /// Look up an environment variable
    pub fn var(&self, key: &str) -> Option<String> {
        (self.env)(key)
    }

    /// Whether the environment variable `key` is set at all
    pub fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

/// A named pipeline integration
pub trait Modifier {
    fn name(&self) -> &'static str;

    /// Publish the context's variables
    ///
    /// # Returns
    /// * `Ok(true)` - The modifier recognised its pipeline and wrote its output
    /// * `Ok(false)` - The pipeline's environment signal is absent
    fn modify(&self, context: &mut PipelineContext<'_>) -> io::Result<bool>;
}

/// All known modifiers
pub fn modifiers() -> Vec<Box<dyn Modifier>> {
    vec![
        Box::new(azure::Azure),
        Box::new(github::Github),
        Box::new(gitlab::Gitlab),
    ]
}

/// Run the selected modifiers and return the names of those that applied
pub fn apply(selection: PipelineSelection, context: &mut PipelineContext<'_>) -> Vec<&'static str> {
    let mut applied = Vec::new();

    for modifier in modifiers() {
        let name = modifier.name();
        if !selection.includes(name) {
            continue;
        }

        match modifier.modify(context) {
            Ok(true) => {
                info!("Applied pipeline modifier {}", name);
                applied.push(name);
            }
            Ok(false) => debug!("Pipeline modifier {} not applicable", name),
            Err(e) => warn!("Pipeline modifier {} failed: {}", name, e),
        }
    }

    if applied.is_empty() {
        debug!("No pipeline modifier applied");
    }
    applied
}

/// Append `KEY=VALUE` lines to `path`, creating the file if needed
pub(crate) fn append_dotenv(path: &Path, variables: &BTreeMap<String, String>) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in variables {
        writeln!(file, "{}={}", key, value)?;
    }
    debug!("Wrote {} variable(s) to {}", variables.len(), path.display());
    Ok(())
}
