//! Configuration loading from environment variables.

pub mod env;
pub mod time_machine;
