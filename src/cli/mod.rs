//! Command-line surface and the version workflow behind it

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{run_version_workflow, WorkflowArgs, WorkflowResult};
