use std::io;

use super::{append_dotenv, Modifier, PipelineContext};

/// GitLab CI: writes a dotenv report artifact
pub struct Gitlab;

impl Modifier for Gitlab {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    fn modify(&self, context: &mut PipelineContext<'_>) -> io::Result<bool> {
        if !context.is_set("GITLAB_CI") {
            return Ok(false);
        }

        append_dotenv(&context.params.gitlab_dotenv, context.variables)?;
        Ok(true)
    }
}
