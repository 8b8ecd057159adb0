//! keiji-cli: data-entry tool for building-management notice posters

use anyhow::Result;
use clap::Parser;

use keiji_cli::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command {
        Commands::Masters { remote } => commands::masters::handle(remote).await,
        Commands::Import { file, user } => commands::import::handle(&file, &user, args.verbose),
        Commands::Export { file, output } => commands::export::handle(&file, output, args.verbose),
        Commands::Submit { file, draft } => {
            commands::submit::handle(&file, draft, args.verbose).await
        }
        Commands::Pending => commands::pending::handle().await,
        Commands::Restore { user, discard } => commands::restore::handle(&user, discard),
    }
}
