use std::path::PathBuf;

use clap::Args;
use geologistic_core::{
    bronze,
    city::{portugal_cities, warehouse_for},
    generate::{DEFAULT_SEED, GeneratorParams, daterange, generate_day},
};
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, warn};

#[derive(Args)]
pub struct GenerateArgs {
    /// First day of the range (default: today, UTC)
    #[arg(long)]
    start_date: Option<Date>,

    /// Last day of the range, inclusive (default: the first day)
    #[arg(long)]
    end_date: Option<Date>,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Directory for the per-day files and the warehouse file
    #[arg(short, long, default_value = "data/bronze")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 5)]
    min_orders: usize,

    #[arg(long, default_value_t = 15)]
    max_orders: usize,
}

pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
    let start = args.start_date.unwrap_or(today);
    let end = args.end_date.unwrap_or(start);
    anyhow::ensure!(start <= end, "start date {start} is after end date {end}");
    anyhow::ensure!(
        args.min_orders <= args.max_orders,
        "min orders {} exceeds max orders {}",
        args.min_orders,
        args.max_orders
    );

    let cities = portugal_cities();
    let warehouse = warehouse_for(&cities)
        .ok_or_else(|| anyhow::anyhow!("warehouse city missing from the city list"))?;

    let params = GeneratorParams {
        min_orders_per_day: args.min_orders,
        max_orders_per_day: args.max_orders,
        ..GeneratorParams::default()
    };
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let ingested_at = Timestamp::now();

    let mut written = 0usize;
    let mut total_rows = 0usize;
    for day in daterange(start, end) {
        let orders = generate_day(&mut rng, day, &cities, &params, ingested_at);
        let path = bronze::orders_path(&args.out_dir, day);
        bronze::write_orders(&path, &orders)?;
        info!("ok: {} ({} rows)", path.display(), orders.len());

        written += 1;
        total_rows += orders.len();
    }

    let warehouse_path = bronze::warehouse_path(&args.out_dir);
    bronze::write_warehouse(&warehouse_path, &warehouse)?;
    info!("ok: {}", warehouse_path.display());

    let expected = daterange(start, end).count();
    if written == expected {
        info!("files generated: {written} (expected: {expected}), total rows: {total_rows}");
    } else {
        warn!("files generated: {written} (expected: {expected}), total rows: {total_rows}");
    }

    Ok(())
}
