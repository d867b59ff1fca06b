//! One-shot watch-list maintenance.

use std::io::Write;

use notifier_core::watchlist::WatchListStore;
use tracing::{info, warn};

use crate::cli::Command;

pub fn run<W: Write>(command: Command, store: &WatchListStore, out: &mut W) -> anyhow::Result<()> {
    match command.canonical() {
        Command::Add { channels } => {
            writeln!(out, "Adding {} channels", channels.len())?;
            store.add(&channels)?;
            info!("Added {:?} to {:?}", channels, store.path());
        }
        Command::Delete { channels } => {
            writeln!(out, "Deleting {} channels", channels.len())?;
            store.delete(&channels)?;
            info!("Deleted {:?} from {:?}", channels, store.path());
        }
        Command::List => {
            for channel in store.load()? {
                writeln!(out, "{}", channel)?;
            }
        }
        Command::Other(args) => {
            warn!("Ignoring unknown command {:?}", args.first());
        }
    }
    writeln!(out, "Done")?;
    Ok(())
}
