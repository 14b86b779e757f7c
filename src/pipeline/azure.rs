use std::io;

use super::{Modifier, PipelineContext, VERSION_VARIABLE};

/// Azure DevOps: sets the build number and pipeline variables via logging commands
pub struct Azure;

impl Modifier for Azure {
    fn name(&self) -> &'static str {
        "azure"
    }

    fn modify(&self, context: &mut PipelineContext<'_>) -> io::Result<bool> {
        if !context.is_set("BUILD_BUILDID") {
            return Ok(false);
        }

        if let Some(version) = context.variables.get(VERSION_VARIABLE) {
            writeln!(context.err, "##vso[build.updatebuildnumber]{}", version)?;
        }
        for (key, value) in context.variables {
            writeln!(context.err, "##vso[task.setvariable variable={}]{}", key, value)?;
        }
        Ok(true)
    }
}
