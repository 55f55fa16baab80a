//! Optipunks - command-line tool for generating the optimistic punks composite

use std::process::ExitCode;

use optipunks::cli;

fn main() -> ExitCode {
    cli::run()
}
