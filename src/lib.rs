pub mod classifier;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod git;
pub mod parser;
pub mod ui;
pub mod writer;

pub use error::{ChangelogError, Result};
