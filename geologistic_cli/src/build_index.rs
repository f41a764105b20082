use std::path::PathBuf;

use clap::Args;
use geologistic_site::{index_page::render_index, manifest::Manifest};
use jiff::civil::Date;
use tracing::info;

#[derive(Args)]
pub struct BuildIndexArgs {
    /// Root of the rendered site
    #[arg(long, default_value = "site")]
    site_dir: PathBuf,
}

pub fn run(args: BuildIndexArgs) -> Result<(), anyhow::Error> {
    let manifest = Manifest::load(&Manifest::path(&args.site_dir))?;
    let days: Vec<Date> = manifest.days().collect();

    let html = render_index(&days);
    std::fs::create_dir_all(&args.site_dir)?;
    let out = args.site_dir.join("index.html");
    std::fs::write(&out, html)?;

    info!("index written: {} ({} days)", out.display(), days.len());

    Ok(())
}
