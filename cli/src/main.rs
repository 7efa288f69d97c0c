mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, discover};
use netsweep_common::{config::Config, error};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.to_config();
    print::banner(cfg.quiet);

    match discover::discover(commands.base.as_deref(), &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
