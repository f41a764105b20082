use std::path::PathBuf;

use clap::Args;
use geologistic_core::silver;
use tracing::info;

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Directory holding the per-day order files
    #[arg(long, default_value = "data/bronze")]
    bronze_dir: PathBuf,

    /// Directory for the consolidated outputs
    #[arg(short, long, default_value = "data/silver")]
    out_dir: PathBuf,
}

pub fn run(args: ConsolidateArgs) -> Result<(), anyhow::Error> {
    let summary = silver::consolidate(&args.bronze_dir, &args.out_dir)?;
    info!(
        "ok: {} rows from {} files -> {}",
        summary.rows,
        summary.files,
        summary.parquet_path.display()
    );

    Ok(())
}
