use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use geologistic_core::{
    bronze,
    error::DatasetError,
    sequence,
    units::{Meters, Seconds},
};
use geologistic_osrm::client::{OSRM_PUBLIC_BASE_URL, OsrmTripClient, OsrmTripClientParams};
use geologistic_site::map_page::{RouteTotals, render_route_map};
use tracing::info;

#[derive(Args)]
pub struct RouteArgs {
    /// The day's order file
    #[arg(long)]
    pub orders_csv: PathBuf,

    /// Warehouse file; only the first row is used
    #[arg(long)]
    pub warehouse_csv: PathBuf,

    /// Point cap, not counting the warehouse
    #[arg(long, default_value_t = 25)]
    pub max_orders: usize,

    /// Output map page
    #[arg(long)]
    pub out_html: PathBuf,

    /// Output ordered-stop file
    #[arg(long)]
    pub out_csv: PathBuf,

    /// yyyy-mm-dd, used only for logging
    #[arg(long)]
    pub scheduled_date: Option<String>,

    /// Routing service base URL (default: $OSRM_BASE_URL, then the public server)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    // Both inputs are validated before the client is even built.
    let mut orders = bronze::read_route_orders(&args.orders_csv)?;
    orders.truncate(args.max_orders);
    if orders.is_empty() {
        return Err(DatasetError::Empty {
            path: args.orders_csv.clone(),
        }
        .into());
    }
    let warehouse = bronze::read_warehouse(&args.warehouse_csv)?;

    // warehouse first, then orders in file order
    let mut points: Vec<geo_types::Point> = Vec::with_capacity(orders.len() + 1);
    points.push((&warehouse).into());
    points.extend(orders.iter().map(geo_types::Point::from));

    let base_url = args
        .base_url
        .or_else(|| std::env::var("OSRM_BASE_URL").ok())
        .unwrap_or_else(|| OSRM_PUBLIC_BASE_URL.to_string());
    let client = OsrmTripClient::new(OsrmTripClientParams {
        base_url,
        ..OsrmTripClientParams::default()
    })?;

    let response = client.fetch_trip(&points).await?;
    let stops = sequence::sequence_stops(&warehouse, &orders, &response.visit_ranks())?;

    let trip = response.trips.first().context("empty trip list")?;
    let distance_km = Meters::new(trip.distance).to_km();
    let duration_min = Seconds::new(trip.duration).to_minutes();

    info!("points sent (incl. warehouse): {}", points.len());
    info!("total distance: {distance_km:.1} km | total duration: {duration_min:.1} min");
    if let Some(date) = &args.scheduled_date {
        info!("date: {date}");
    }

    let html = render_route_map(
        &stops,
        &trip.geometry,
        &RouteTotals {
            distance_km,
            duration_min,
        },
    );
    if let Some(parent) = args.out_html.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.out_html, html)?;
    sequence::write_sequence(&args.out_csv, &stops)?;

    info!("map page: {}", args.out_html.display());
    info!("sequence: {}", args.out_csv.display());

    Ok(())
}
