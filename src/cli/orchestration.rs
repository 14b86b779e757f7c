//! Main workflow orchestration logic
//!
//! Keeps the version workflow separate from CLI argument parsing so it can be
//! driven programmatically, with the environment and output sinks supplied by
//! the caller.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::git::Git2Repository;
use crate::pipeline::{self, PipelineContext, PipelineParams, PipelineSelection, VERSION_VARIABLE};
use crate::resolver::{Resolution, ResolverOptions, VersionResolver};

/// Arguments for the version workflow
///
/// Mirrors the CLI Args after merging with the configuration file, without
/// depending on clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowArgs {
    /// Repository root
    pub path: PathBuf,

    pub resolver: ResolverOptions,

    /// Pipeline modifiers to consult
    pub pipeline: PipelineSelection,

    pub params: PipelineParams,
}

impl Default for WorkflowArgs {
    fn default() -> Self {
        WorkflowArgs {
            path: PathBuf::from("."),
            resolver: ResolverOptions::default(),
            pipeline: PipelineSelection::Auto,
            params: PipelineParams::default(),
        }
    }
}

/// Result of a successful version workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    /// Final version text, including any build metadata
    pub version: String,

    pub resolution: Resolution,

    /// Names of the pipeline modifiers that applied
    pub modifiers: Vec<&'static str>,
}

/// Main version workflow
///
/// 1. Compile all patterns
/// 2. Open the repository
/// 3. Resolve the version
/// 4. Publish it through the selected pipeline modifiers
///
/// # Arguments
///
/// * `args` - Merged workflow arguments
/// * `env` - Environment lookup handed to the pipeline modifiers
/// * `out`, `err` - Output sinks handed to the pipeline modifiers
///
/// # Returns
///
/// The version and the modifiers that published it. The repository is
/// released on every path out of this function.
pub fn run_version_workflow(
    args: &WorkflowArgs,
    env: &dyn Fn(&str) -> Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<WorkflowResult> {
    let resolver = VersionResolver::new(&args.resolver)?;
    let repository = Git2Repository::open(&args.path)?;
    let resolution = resolver.resolve(&repository)?;
    let version = resolution.to_string();
    info!("Calculated version {}", version);

    let variables = BTreeMap::from([(VERSION_VARIABLE.to_string(), version.clone())]);
    let mut context = PipelineContext {
        env,
        variables: &variables,
        out,
        err,
        params: &args.params,
    };
    let modifiers = pipeline::apply(args.pipeline, &mut context);
    repository.close();

    Ok(WorkflowResult {
        version,
        resolution,
        modifiers,
    })
}
