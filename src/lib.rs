pub mod args;
pub mod config;
mod log;
pub mod preflight;
pub mod prompts;
pub mod replacer;
pub mod scaffold;
pub mod shell;
