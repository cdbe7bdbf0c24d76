//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::args::Cli;
use crate::APP_NAME;

/// Print the completion script for `shell` to stdout.
pub fn print(shell: Shell) {
    write(shell, &mut io::stdout());
}

/// Write the completion script for `shell`, registered under the binary name.
pub fn write<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, APP_NAME, out);
}
