mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("pdbkit CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = dispatch(&cli);
    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}

fn dispatch(cli: &Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let load_config = || config::load(cli.config.as_deref());

    match &cli.command {
        Commands::Chains(args) => commands::records::chains(args, &mut out),
        Commands::FirstChain(args) => commands::records::first_chain(args, &mut out),
        Commands::Residues(args) => commands::records::residues(args, &mut out),
        Commands::CaModel(args) => commands::records::ca_model(args, &mut out),
        Commands::Coords(args) => commands::records::coords(args, &mut out),
        Commands::ReplaceChains(args) => commands::records::replace_chains(args),
        Commands::ExtractChains(args) => commands::records::extract_chains(args),
        Commands::RemoveTer(args) => commands::records::remove_ter(args),
        Commands::UpdateXyz(args) => commands::transform::update_xyz(args),
        Commands::Rottrans(args) => commands::transform::rottrans(args),
        Commands::Tidy(args) => commands::tools::tidy(args, &load_config()?.tools),
        Commands::Delocc(args) => commands::tools::delocc(args, &load_config()?.tools),
        Commands::Pipeline(args) => commands::tools::pipeline(args, &load_config()?.tools),
        Commands::Fetch(args) => commands::fetch::fetch(args, load_config()?.fetch, cli.quiet),
        Commands::Download(args) => {
            commands::fetch::download(args, load_config()?.fetch, cli.quiet)
        }
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
    }
}
