//! View My Startup client: bootstrap and interactive shell.

pub mod bootstrap;
pub mod cli;
pub mod shell;
