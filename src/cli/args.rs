use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::cli::WorkflowArgs;
use crate::config::Config;
use crate::domain::Overrides;
use crate::pipeline::{PipelineParams, PipelineSelection};
use crate::resolver::{
    ResolverOptions, DEFAULT_DIRTY_SUFFIX, DEFAULT_PATCH_PATTERN, DEFAULT_TAG_PATTERN,
    DEFAULT_VERSION_PATTERN,
};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "gitversion",
    version,
    about = "Calculate a version number from git history"
)]
pub struct Args {
    #[arg(default_value = ".", help = "Repository root")]
    pub path: PathBuf,

    #[arg(
        long = "version_pattern",
        value_name = "REGEX",
        help = "Expression capturing major, minor and patch from tag text [default: (\\d+)(?:[.](\\d+)(?:[.](\\d+))?)?]"
    )]
    pub version_pattern: Option<String>,

    #[arg(
        long = "tag_pattern",
        value_name = "REGEX",
        help = "Expression selecting version tags [default: v(.+)]"
    )]
    pub tag_pattern: Option<String>,

    #[arg(
        long = "major_pattern",
        value_name = "REGEX",
        help = "Commit message expression for major increments"
    )]
    pub major_pattern: Option<String>,

    #[arg(
        long = "minor_pattern",
        value_name = "REGEX",
        help = "Commit message expression for minor increments"
    )]
    pub minor_pattern: Option<String>,

    #[arg(
        long = "patch_pattern",
        value_name = "REGEX",
        help = "Commit message expression for patch increments [default: .+]"
    )]
    pub patch_pattern: Option<String>,

    #[arg(short, long, help = "Only count commits touching this directory")]
    pub directory: Option<String>,

    #[arg(short, long, help = "Component name used as tag prefix and directory")]
    pub component: Option<String>,

    #[arg(long = "dirty_ignore", help = "Ignore uncommitted modifications")]
    pub dirty_ignore: bool,

    #[arg(
        long = "dirty_suffix",
        help = "Suffix for versions with uncommitted modifications [default: SNAPSHOT]"
    )]
    pub dirty_suffix: Option<String>,

    #[arg(long = "major_override", help = "Force the major number")]
    pub major_override: Option<u64>,

    #[arg(long = "minor_override", help = "Force the minor number")]
    pub minor_override: Option<u64>,

    #[arg(long = "patch_override", help = "Force the patch number")]
    pub patch_override: Option<u64>,

    #[arg(long = "suffix_override", help = "Force the suffix")]
    pub suffix_override: Option<String>,

    #[arg(long = "append_hash", help = "Append the abbreviated head commit id")]
    pub append_hash: bool,

    #[arg(long, value_enum, help = "Pipeline to publish to [default: auto]")]
    pub pipeline: Option<PipelineSelection>,

    #[arg(
        long = "pipeline-gitlab-dotenv",
        value_name = "FILE",
        help = "Dotenv file written for GitLab [default: build.env]"
    )]
    pub pipeline_gitlab_dotenv: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-v info, -vv debug)")]
    pub verbose: u8,

    #[arg(short, long, help = "Show the full error chain on failure")]
    pub stacktrace: bool,
}

impl Args {
    /// Log level selected by the `-v` count
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Merge with the configuration file; command-line values win
    pub fn into_workflow_args(self, config: Config) -> WorkflowArgs {
        let resolver = ResolverOptions {
            version_pattern: self
                .version_pattern
                .or(config.version_pattern)
                .unwrap_or_else(|| DEFAULT_VERSION_PATTERN.to_string()),
            tag_pattern: self
                .tag_pattern
                .or(config.tag_pattern)
                .or_else(|| Some(DEFAULT_TAG_PATTERN.to_string())),
            major_pattern: self.major_pattern.or(config.major_pattern),
            minor_pattern: self.minor_pattern.or(config.minor_pattern),
            patch_pattern: self
                .patch_pattern
                .or(config.patch_pattern)
                .or_else(|| Some(DEFAULT_PATCH_PATTERN.to_string())),
            directory: self.directory.or(config.directory),
            component: self.component.or(config.component),
            dirty_ignore: self.dirty_ignore || config.dirty_ignore.unwrap_or(false),
            dirty_suffix: self
                .dirty_suffix
                .or(config.dirty_suffix)
                .or_else(|| Some(DEFAULT_DIRTY_SUFFIX.to_string())),
            overrides: Overrides {
                major: self.major_override,
                minor: self.minor_override,
                patch: self.patch_override,
                suffix: self.suffix_override,
            },
            append_hash: self.append_hash || config.append_hash.unwrap_or(false),
        };

        let mut params = PipelineParams::default();
        if let Some(dotenv) = self.pipeline_gitlab_dotenv.or(config.pipeline_gitlab_dotenv) {
            params.gitlab_dotenv = dotenv;
        }

        WorkflowArgs {
            path: self.path,
            resolver,
            pipeline: self.pipeline.or(config.pipeline).unwrap_or_default(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gitversion").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.log_level(), LevelFilter::Warn);

        let workflow = args.into_workflow_args(Config::default());
        assert_eq!(workflow.resolver, ResolverOptions::default());
        assert_eq!(workflow.pipeline, PipelineSelection::Auto);
        assert_eq!(workflow.params, PipelineParams::default());
    }

    #[test]
    fn test_underscore_flags() {
        let args = parse(&[
            "repo",
            "--tag_pattern",
            "release-(.+)",
            "--major_pattern",
            "breaking.*",
            "--dirty_ignore",
            "--major_override",
            "3",
            "--suffix_override",
            "rc1",
            "--append_hash",
            "-c",
            "core",
            "--pipeline",
            "none",
        ]);

        let workflow = args.into_workflow_args(Config::default());
        assert_eq!(workflow.path, PathBuf::from("repo"));
        assert_eq!(
            workflow.resolver.tag_pattern.as_deref(),
            Some("release-(.+)")
        );
        assert_eq!(workflow.resolver.major_pattern.as_deref(), Some("breaking.*"));
        assert!(workflow.resolver.dirty_ignore);
        assert!(workflow.resolver.append_hash);
        assert_eq!(workflow.resolver.overrides.major, Some(3));
        assert_eq!(workflow.resolver.overrides.suffix.as_deref(), Some("rc1"));
        assert_eq!(workflow.resolver.component.as_deref(), Some("core"));
        assert_eq!(workflow.pipeline, PipelineSelection::None);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["-v"]).log_level(), LevelFilter::Info);
        assert_eq!(parse(&["-vv"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["-vvv"]).log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_config_fills_gaps_and_cli_wins() {
        let config = Config {
            tag_pattern: Some("from-config-(.+)".to_string()),
            dirty_suffix: Some("dev".to_string()),
            append_hash: Some(true),
            pipeline: Some(PipelineSelection::Gitlab),
            pipeline_gitlab_dotenv: Some(PathBuf::from("custom.env")),
            ..Config::default()
        };

        let workflow =
            parse(&["--tag_pattern", "from-cli-(.+)"]).into_workflow_args(config);
        assert_eq!(
            workflow.resolver.tag_pattern.as_deref(),
            Some("from-cli-(.+)")
        );
        assert_eq!(workflow.resolver.dirty_suffix.as_deref(), Some("dev"));
        assert!(workflow.resolver.append_hash);
        assert_eq!(workflow.pipeline, PipelineSelection::Gitlab);
        assert_eq!(workflow.params.gitlab_dotenv, PathBuf::from("custom.env"));
    }

    #[test]
    fn test_rejects_unknown_pipeline() {
        let result = Args::try_parse_from(["gitversion", "--pipeline", "jenkins"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_override() {
        let result = Args::try_parse_from(["gitversion", "--major_override", "-1"]);
        assert!(result.is_err());
    }
}
