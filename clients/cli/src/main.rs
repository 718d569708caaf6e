use std::path::Path;
use std::process::ExitCode;

use akamai_iam_cli::{
    print_help,
    run_cli,
    Cli,
    CliCommand,
    Config,
    LoggingContext,
    LOG_DIR,
};
use dotenvy::dotenv;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file. Best effort.
    let dotenv_loaded = dotenv();

    let Some(cli) = Cli::parse_args() else {
        return ExitCode::SUCCESS;
    };
    let Some(common) = cli.command.common() else {
        if let CliCommand::Help { command } = &cli.command {
            // A closed stdout is not worth failing over.
            let _ = print_help(command.as_deref());
        }
        return ExitCode::SUCCESS;
    };

    let _logging = LoggingContext::install(Path::new(LOG_DIR), common.debug);
    if let Err(e) = dotenv_loaded {
        debug!("Didn't load .env file: {e}");
    }

    let config = match Config::from_options(common) {
        | Ok(config) => config,
        | Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        res = run_cli(&cli.command, &config) => match res {
            | Ok(()) => ExitCode::SUCCESS,
            | Err(e) => {
                error!("{e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            error!("Interrupted");
            ExitCode::FAILURE
        }
    }
}
