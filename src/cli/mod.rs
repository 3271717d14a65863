pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taxfilter",
    version,
    about = "Filter sequence catalogs by NCBI taxonomy subtree",
    long_about = "taxfilter expands include/exclude taxon ids into their full descendant sets \
                  using NCBI nodes.dmp, then streams a (possibly gzipped) catalog and prints the \
                  payload id of every record whose taxon falls inside the resulting whitelist."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print payload ids of catalog records inside the taxonomy whitelist
    Filter(commands::filter::FilterArgs),

    /// Print the whitelisted taxon ids, one per line
    Descendants(commands::descendants::DescendantsArgs),

    /// Write a default configuration file
    InitConfig(commands::init_config::InitConfigArgs),
}
