mod backup;
mod cli;
mod commands;
mod config;
mod file_io;

use anyhow::Result;
use clap::Parser;

use cli::*;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decrypt {
            input,
            output,
            pretty,
        } => {
            commands::save::decrypt(&input, output.as_deref(), pretty)?;
        }

        Commands::Encrypt { input, output } => {
            commands::save::encrypt(input.as_deref(), &output)?;
        }

        Commands::Info { input } => {
            commands::save::info(&input)?;
        }

        Commands::Get { input, query } => {
            commands::save::get(&input, &query)?;
        }

        Commands::Set {
            edit,
            path,
            value,
            raw,
        } => {
            commands::save::set(&edit, &path, &value, raw)?;
        }

        Commands::Dwellers { input } => {
            commands::dweller::list(&input)?;
        }

        Commands::Dweller {
            edit,
            id,
            names,
            action,
        } => {
            commands::dweller::handle(&edit, id, names.as_deref(), action)?;
        }

        Commands::Resource { edit, name, value } => {
            commands::vault::resource(&edit, name.as_deref(), value)?;
        }

        Commands::Consumable { edit, kind, count } => {
            commands::vault::consumable(&edit, kind.as_deref(), count)?;
        }

        Commands::Unlock { edit, kind, id } => {
            commands::vault::unlock(&edit, kind, &id)?;
        }

        Commands::Batch { edit, action } => {
            commands::batch::handle(&edit, &action)?;
        }

        Commands::Bonus { name } => {
            commands::bonus::handle(name.as_deref())?;
        }

        Commands::Configure {
            backup,
            pretty,
            show,
        } => {
            commands::configure::handle(backup, pretty, show)?;
        }
    }

    Ok(())
}
