//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use courier_cli::CliError;

fn main() {
    env_logger::init();
    if let Err(err) = courier_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("courier: {err}");
        std::process::exit(1);
    }
}
