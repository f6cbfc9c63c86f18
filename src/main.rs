//! catalogd entry point
//!
//! Parses arguments, dispatches to the CLI module and exits non-zero on
//! failure. All other logic lives in the library.

use catalogd::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
