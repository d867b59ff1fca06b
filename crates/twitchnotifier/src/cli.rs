use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watch a list of Twitch channels and get notified when they go live.
///
/// Without a subcommand the live status of every watched channel is printed
/// and refreshed until the process is killed.
#[derive(Debug, Parser)]
#[command(name = "twitchnotifier", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (default: ~/.config/twitch-notifier/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Watch-list file, overriding `paths.channels_file`
    #[arg(long, global = true, value_name = "PATH")]
    pub channels_file: Option<PathBuf>,

    /// Format file, overriding `paths.format_file`
    #[arg(long, global = true, value_name = "PATH")]
    pub format_file: Option<PathBuf>,

    /// Poll a single time and exit
    #[arg(long)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add channels to the watch-list
    Add { channels: Vec<String> },
    /// Remove channels from the watch-list
    Delete { channels: Vec<String> },
    /// Print the watch-list, one channel per line
    List,
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Command {
    /// Subcommand names are case-insensitive (`ADD`, `List`, ...).
    pub fn canonical(self) -> Self {
        match self {
            Command::Other(args) => Self::from_external(args),
            known => known,
        }
    }

    fn from_external(args: Vec<String>) -> Self {
        let Some((name, rest)) = args.split_first() else {
            return Command::Other(args);
        };
        match name.to_lowercase().as_str() {
            "add" => Command::Add {
                channels: rest.to_vec(),
            },
            "delete" => Command::Delete {
                channels: rest.to_vec(),
            },
            "list" => Command::List,
            _ => Command::Other(args),
        }
    }
}
