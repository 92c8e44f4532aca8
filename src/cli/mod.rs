pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{BatchArgs, CliArgs, Commands, DetectArgs};
pub use output::{OutputFormat, OutputFormatter};
