use crate::cli::output::success;
use crate::core::config::{save_config, Config};
use crate::TaxFilterError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the configuration
    #[arg(value_name = "FILE", default_value = "taxfilter.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        return Err(TaxFilterError::Config(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        ))
        .into());
    }

    save_config(&args.path, &Config::default())?;
    success(&format!("Wrote default configuration to {}", args.path.display()));
    Ok(())
}
