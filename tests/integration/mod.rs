//! Integration tests for artifacts-codegen


#[cfg(unix)]
mod cli_binary;
