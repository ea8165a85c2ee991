use clap::Parser;
use ics_rs::ui::cli::cli_commands;
use ics_rs::utils::logging::init_logging;

fn main() {
    let args = cli_commands::Args::parse();
    init_logging(args.verbose);
    if let Err(e) = cli_commands::run_cli(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
