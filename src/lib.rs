//! Artifacts Codegen: OpenAPI client generation for Artifacts MMO
//!
//! Resolves the spec URL from layered configuration, locates the `deno` runtime,
//! runs the OpenAPI generator to produce a Python client, and installs the result
//! as an editable package with `uv`.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod generate;
pub mod install;
pub mod logging;
pub mod runtime;
pub mod workflow;
