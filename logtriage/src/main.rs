//! Binary entrypoint for the logtriage CLI.

use clap::Parser;
use logtriage::{run, Cli};

fn main() {
  let cli = Cli::parse();

  if let Err(e) = run(cli) {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}
