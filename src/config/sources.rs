//! Configuration sources layered on top of the defaults.

pub mod env_file;
pub mod environment;
