use clap::Parser;
use colored::*;
use std::process;
use taxfilter::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then TAXFILTER_LOG, then the -v count
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_level = std::env::var("TAXFILTER_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        // Downstream reader exited (e.g. `| head`); output so far is complete
        if is_broken_pipe(&e) {
            process::exit(0);
        }
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<taxfilter::TaxFilterError>() {
            Some(taxfilter::TaxFilterError::Config(_)) => 2,
            Some(taxfilter::TaxFilterError::Io(_))
            | Some(taxfilter::TaxFilterError::Open { .. })
            | Some(taxfilter::TaxFilterError::Read { .. }) => 3,
            Some(taxfilter::TaxFilterError::TaxonomyParse { .. })
            | Some(taxfilter::TaxFilterError::MalformedRecord { .. }) => 4,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe)
            || cause
                .downcast_ref::<taxfilter::TaxFilterError>()
                .is_some_and(taxfilter::TaxFilterError::is_broken_pipe)
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let num_threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    if cli.verbose > 0 {
        eprintln!("Using {} threads", num_threads);
    }

    match cli.command {
        Commands::Filter(args) => taxfilter::cli::commands::filter::run(args, cli.quiet).map(|_| ()),
        Commands::Descendants(args) => {
            taxfilter::cli::commands::descendants::run(args, cli.quiet).map(|_| ())
        }
        Commands::InitConfig(args) => taxfilter::cli::commands::init_config::run(args),
    }
}
