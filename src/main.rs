use std::process::exit;

use clap::Parser;
use sshot::capture::CaptureDependencies;
use sshot::cli::Cli;
use sshot::error::{AppError, EXIT_ARGUMENT_ERROR, EXIT_SUCCESS};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let code = if err.use_stderr() {
                EXIT_ARGUMENT_ERROR
            } else {
                EXIT_SUCCESS
            };
            let _ = err.print();
            exit(code);
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => exit(EXIT_SUCCESS),
        Err(err) => {
            log::debug!("Exiting after error: {:?}", err);
            eprintln!("Error: {err}");
            exit(err.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,sshot=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(AppError::Runtime)?;

    runtime.block_on(sshot::app::run(cli, CaptureDependencies::default()))
}
