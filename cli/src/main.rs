mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, info, probe, sweep};
use labwire_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.to_config();

    logging::init_logging(commands.verbose, cfg.json);
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Info => {
            info::info(&cfg)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Probe { ip, port } => {
            print::header("probing instrument", cfg.quiet.max(u8::from(cfg.json)));
            probe::probe(ip, port, &cfg).await
        }
        Commands::Sweep { inventory } => {
            print::header("getting ready for sweep", cfg.quiet.max(u8::from(cfg.json)));
            sweep::sweep(&inventory, &cfg).await
        }
    }
}
