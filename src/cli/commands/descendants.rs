use super::{build_whitelist, SelectionArgs};
use crate::utils::io::open_output;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct DescendantsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output file for taxon ids (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: DescendantsArgs, quiet: bool) -> anyhow::Result<usize> {
    let config = args.selection.resolve()?;
    config.validate()?;

    let (whitelist, _) = build_whitelist(&config, quiet)?;

    let mut writer = open_output(args.output.as_deref())?;
    let ids = whitelist.sorted();
    for taxon_id in &ids {
        writeln!(writer, "{}", taxon_id)?;
    }
    writer.flush()?;

    Ok(ids.len())
}
