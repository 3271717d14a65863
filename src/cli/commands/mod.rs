pub mod descendants;
pub mod filter;
pub mod init_config;

use crate::bio::taxonomy::{TaxonId, TaxonomyGraph};
use crate::cli::output::{action, format_number, success, tree_section, warning};
use crate::core::config::{load_config, Config, SelectionConfig};
use crate::core::whitelist::{Whitelist, WhitelistStats};
use crate::utils::progress::create_counter;
use clap::Args;
use std::path::PathBuf;

/// Taxonomy selection shared by every command that builds a whitelist
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Taxon ids whose descendants are included (repeat or comma-separate)
    #[arg(short, long, value_name = "TAXID", num_args = 1.., value_delimiter = ',')]
    pub include: Vec<TaxonId>,

    /// Taxon ids whose descendants are removed from the included set
    #[arg(short, long, value_name = "TAXID", num_args = 1.., value_delimiter = ',')]
    pub exclude: Vec<TaxonId>,

    /// Ignore any exclude list from the config file
    #[arg(long, conflicts_with = "exclude")]
    pub no_exclude: bool,

    /// NCBI nodes.dmp (default: nodes.dmp, or the config file's value)
    #[arg(short, long, value_name = "FILE")]
    pub nodes: Option<PathBuf>,

    /// TOML configuration file; command-line values take precedence
    #[arg(long, value_name = "FILE", env = "TAXFILTER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl SelectionArgs {
    /// Merge the optional config file with command-line overrides.
    ///
    /// Without a config file the selection comes from the command line only.
    pub fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config {
                selection: SelectionConfig {
                    include: Vec::new(),
                    exclude: Vec::new(),
                },
                ..Config::default()
            },
        };

        if !self.include.is_empty() {
            config.selection.include = self.include.clone();
        }
        if self.no_exclude {
            config.selection.exclude.clear();
        } else if !self.exclude.is_empty() {
            config.selection.exclude = self.exclude.clone();
        }
        if let Some(nodes) = &self.nodes {
            config.taxonomy.nodes = nodes.clone();
        }

        Ok(config)
    }
}

/// Load the taxonomy and compute the whitelist described by `config`
pub(crate) fn build_whitelist(
    config: &Config,
    quiet: bool,
) -> anyhow::Result<(Whitelist, WhitelistStats)> {
    if !quiet {
        action(&format!(
            "Reading NCBI taxonomy from {}",
            config.taxonomy.nodes.display()
        ));
    }
    let progress = create_counter("Reading taxonomy", !quiet);
    let graph = TaxonomyGraph::load_nodes(
        &config.taxonomy.nodes,
        &progress,
        config.taxonomy.progress_interval,
    )?;
    progress.finish_and_clear();

    if !quiet {
        success(&format!(
            "Loaded {} parent/child relations ({} parent taxa)",
            format_number(graph.edge_count()),
            format_number(graph.parent_count())
        ));
    }

    let (whitelist, stats) = Whitelist::build(
        &graph,
        &config.selection.include,
        &config.selection.exclude,
    );

    if whitelist.is_empty() {
        warning("Whitelist is empty; no catalog records can match");
    }

    tree_section(&[
        ("Included taxa", format_number(stats.included)),
        ("Excluded taxa", format_number(stats.excluded)),
        ("Whitelisted taxa", format_number(stats.whitelisted)),
    ]);

    Ok((whitelist, stats))
}
