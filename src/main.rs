//! treeconf CLI entrypoint

use clap::Parser;

use treeconf::cli::Cli;
use treeconf::output;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        output::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
