mod cli;
mod error;
mod logging;
mod output;
mod run;
mod ui;

use clap::Parser;
use tracing::error;

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file) {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run::execute(cli) {
        error!("{e}");
        eprintln!("\n❌ Error: {e}");
        std::process::exit(1);
    }
}
