use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use gitversion::cli::{run_version_workflow, Args};
use gitversion::config::load_config;
use gitversion::{ui, GitVersionError};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());
    let stacktrace = args.stacktrace;

    match run(args) {
        Ok(version) => {
            println!("{}", version);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = if stacktrace {
                err.chain()
                    .map(|cause| cause.to_string())
                    .collect::<Vec<_>>()
                    .join("\n  caused by: ")
            } else {
                err.to_string()
            };
            ui::display_error(&message);

            let code = err
                .downcast_ref::<GitVersionError>()
                .map_or(3, GitVersionError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(args: Args) -> Result<String> {
    let config = load_config(args.config.as_deref(), &args.path)?;
    let workflow = args.into_workflow_args(config);

    let env = |key: &str| std::env::var(key).ok();
    let result = run_version_workflow(&workflow, &env, &mut io::stdout(), &mut io::stderr())?;
    Ok(result.version)
}
