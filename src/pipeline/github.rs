use std::io;
use std::path::Path;

use log::warn;

use super::{append_dotenv, Modifier, PipelineContext, VERSION_VARIABLE};

/// Files GitHub Actions reads variables back from, named by these environment variables
const FILE_VARIABLES: [&str; 2] = ["GITHUB_ENV", "GITHUB_OUTPUT"];

/// GitHub Actions: annotates the run and exports variables to later steps
pub struct Github;

impl Modifier for Github {
    fn name(&self) -> &'static str {
        "github"
    }

    fn modify(&self, context: &mut PipelineContext<'_>) -> io::Result<bool> {
        if !context.is_set("GITHUB_ACTION") {
            return Ok(false);
        }

        if let Some(version) = context.variables.get(VERSION_VARIABLE) {
            writeln!(
                context.err,
                "::notice title=GitVersion::Calculated version is {}",
                version
            )?;
        }
        // each file is written independently of the other
        for key in FILE_VARIABLES {
            if let Some(path) = context.var(key).filter(|p| !p.is_empty()) {
                if let Err(e) = append_dotenv(Path::new(&path), context.variables) {
                    warn!("Could not write {} file {}: {}", key, path, e);
                }
            }
        }
        Ok(true)
    }
}
