//! Command-line interface module.

mod args;
pub mod build;
pub mod discover;
pub mod manifest;
pub mod serve;
pub mod validate;

pub use args::{Cli, Commands, SitemapArgs};
