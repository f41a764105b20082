use std::path::PathBuf;

use clap::Args;
use geologistic_core::bronze;
use geologistic_site::manifest::Manifest;
use jiff::civil::Date;
use tracing::info;

use crate::route;

#[derive(Args)]
pub struct BuildDayArgs {
    /// Day to publish, yyyy-mm-dd
    #[arg(long)]
    pub date: Date,

    #[arg(long, default_value_t = 25)]
    pub max_orders: usize,

    /// Directory holding the per-day order files
    #[arg(long, default_value = "data/bronze")]
    pub bronze_dir: PathBuf,

    /// Root of the rendered site
    #[arg(long, default_value = "site")]
    pub site_dir: PathBuf,

    /// Routing service base URL (default: $OSRM_BASE_URL, then the public server)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: BuildDayArgs) -> Result<(), anyhow::Error> {
    let orders_csv = bronze::orders_path(&args.bronze_dir, args.date);
    let warehouse_csv = bronze::warehouse_path(&args.bronze_dir);

    // both inputs must exist before anything lands under site/<date>/
    anyhow::ensure!(
        orders_csv.exists(),
        "missing orders file: {}",
        orders_csv.display()
    );
    anyhow::ensure!(
        warehouse_csv.exists(),
        "missing warehouse file: {}",
        warehouse_csv.display()
    );

    let out_dir = args.site_dir.join(args.date.to_string());
    std::fs::create_dir_all(&out_dir)?;

    route::run(route::RouteArgs {
        orders_csv,
        warehouse_csv,
        max_orders: args.max_orders,
        out_html: out_dir.join("index.html"),
        out_csv: out_dir.join("optimized_sequence.csv"),
        scheduled_date: Some(args.date.to_string()),
        base_url: args.base_url,
    })
    .await?;

    let manifest_path = Manifest::path(&args.site_dir);
    let mut manifest = Manifest::load(&manifest_path)?;
    manifest.record(args.date);
    manifest.save(&manifest_path)?;

    info!("ok: {} -> {}", args.date, out_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args(bronze_dir: PathBuf, site_dir: PathBuf) -> BuildDayArgs {
        BuildDayArgs {
            date: "2025-10-01".parse().unwrap(),
            max_orders: 25,
            bronze_dir,
            site_dir,
            base_url: None,
        }
    }

    #[tokio::test]
    async fn test_missing_warehouse_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let bronze_dir = dir.path().join("bronze");
        let site_dir = dir.path().join("site");
        std::fs::create_dir_all(&bronze_dir).unwrap();
        std::fs::write(
            bronze_dir.join("orders_pt_2025-10-01.csv"),
            "order_id,lon,lat,city\nord-1,-8.6,41.1,porto\n",
        )
        .unwrap();

        let result = run(test_args(bronze_dir, site_dir.clone())).await;

        assert!(result.is_err());
        assert!(!site_dir.exists());
    }

    #[tokio::test]
    async fn test_missing_orders_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let bronze_dir = dir.path().join("bronze");
        let site_dir = dir.path().join("site");
        std::fs::create_dir_all(&bronze_dir).unwrap();

        let result = run(test_args(bronze_dir, site_dir.clone())).await;

        assert!(result.is_err());
        assert!(!site_dir.exists());
    }
}
