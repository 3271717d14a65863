use super::{build_whitelist, SelectionArgs};
use crate::bio::catalog::CatalogSchema;
use crate::bio::taxonomy::TaxonId;
use crate::cli::output::{format_number, section_header, success, tree_section, warning};
use crate::core::filter::{filter_records, FilterOptions, FilterSummary};
use crate::core::whitelist::WhitelistStats;
use crate::utils::io::{open_input, open_output};
use crate::utils::progress::create_counter;
use crate::TaxFilterError;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Catalog to filter (gzip-compressed when the name ends in .gz)
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Column layout of the catalog
    #[arg(long, value_enum)]
    pub schema: Option<CatalogSchema>,

    /// Stop after this many catalog lines
    #[arg(long, value_name = "LINES")]
    pub limit: Option<u64>,

    /// Catalog lines between progress updates
    #[arg(long, value_name = "LINES")]
    pub progress_interval: Option<u64>,

    /// Output file for payload ids (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write run counts as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,
}

/// Counts written by `--summary-json`
#[derive(Debug, Serialize)]
pub struct FilterReport {
    pub catalog: PathBuf,
    pub schema: CatalogSchema,
    pub include: Vec<TaxonId>,
    pub exclude: Vec<TaxonId>,
    pub taxa: WhitelistStats,
    pub records: FilterSummary,
}

pub fn run(args: FilterArgs, quiet: bool) -> anyhow::Result<FilterSummary> {
    let mut config = args.selection.resolve()?;
    if let Some(schema) = args.schema {
        config.filter.schema = schema;
    }
    if let Some(limit) = args.limit {
        config.filter.limit = Some(limit);
    }
    if let Some(interval) = args.progress_interval {
        config.filter.progress_interval = interval;
    }
    config.validate()?;

    let (whitelist, taxa) = build_whitelist(&config, quiet)?;

    let options = FilterOptions {
        schema: config.filter.schema,
        limit: config.filter.limit,
        progress_interval: config.filter.progress_interval,
    };

    tracing::info!(
        "Filtering {} ({} schema)",
        args.catalog.display(),
        options.schema
    );
    let reader = open_input(&args.catalog)?;
    let writer = open_output(args.output.as_deref())?;
    let progress = create_counter("Filtering catalog", !quiet);
    let summary = filter_records(reader, &whitelist, writer, &options, &progress)
        .map_err(|e| e.at_path(&args.catalog))?;
    progress.finish_and_clear();

    section_header("Catalog Summary");
    tree_section(&[
        ("Records processed", format_number(summary.processed)),
        ("Records matched", format_number(summary.matched)),
    ]);
    if summary.output_closed {
        warning("Output closed early; remaining catalog lines were not read");
    }
    if summary.truncated {
        success(&format!(
            "Stopped at line limit ({} lines)",
            format_number(summary.processed)
        ));
    }

    if let Some(path) = &args.summary_json {
        let report = FilterReport {
            catalog: args.catalog.clone(),
            schema: options.schema,
            include: config.selection.include.clone(),
            exclude: config.selection.exclude.clone(),
            taxa,
            records: summary,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| TaxFilterError::Other(format!("Failed to serialize summary: {}", e)))?;
        std::fs::write(path, json).map_err(|source| TaxFilterError::Open {
            path: path.clone(),
            source,
        })?;
    }

    Ok(summary)
}
