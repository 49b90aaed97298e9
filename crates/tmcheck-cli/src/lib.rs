mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod output;
pub mod settings;
pub mod types;

pub use args::{Cli, Commands, ProfileCommand};
pub use commands::run;
