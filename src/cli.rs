//! CLI domain: parse and output only. The workflow itself lives in `workflow`.

mod output;
mod parse;

pub use output::map_error;
pub use parse::Cli;
