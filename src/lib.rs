pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod pattern;
pub mod pipeline;
pub mod resolver;
pub mod ui;

pub use error::{GitVersionError, Result};
