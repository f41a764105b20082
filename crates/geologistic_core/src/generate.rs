use jiff::{Timestamp, ToSpan, civil::Date};
use rand::{Rng, rngs::SmallRng};
use uuid::Uuid;

use crate::{
    city::City,
    order::{Order, Priority},
};

pub const DEFAULT_SEED: u64 = 42;

const SERVICE_TIMES_MIN: [i64; 4] = [5, 10, 15, 20];
const PRIORITIES: [Priority; 3] = [Priority::Low, Priority::Normal, Priority::High];

#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub min_orders_per_day: usize,
    pub max_orders_per_day: usize,
    /// Bound of the uniform coordinate jitter, in degrees per axis.
    pub max_jitter_lon: f64,
    pub max_jitter_lat: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            min_orders_per_day: 5,
            max_orders_per_day: 15,
            max_jitter_lon: 0.03,
            max_jitter_lat: 0.02,
        }
    }
}

/// Every calendar day in the inclusive range.
pub fn daterange(start: Date, end: Date) -> impl Iterator<Item = Date> {
    start.series(1.day()).take_while(move |day| *day <= end)
}

/// One day's worth of synthetic orders. Counts and coordinates come from the
/// caller-owned rng; order ids come from the OS, not the seeded rng, so they
/// differ run to run even for a fixed seed.
pub fn generate_day(
    rng: &mut SmallRng,
    date: Date,
    cities: &[City],
    params: &GeneratorParams,
    ingested_at: Timestamp,
) -> Vec<Order> {
    if cities.is_empty() {
        return Vec::new();
    }

    let count = rng.random_range(params.min_orders_per_day..=params.max_orders_per_day);
    let mut orders = Vec::with_capacity(count);
    for _ in 0..count {
        let base = &cities[rng.random_range(0..cities.len())];
        let (lon, lat) = jitter(rng, base.lon, base.lat, params);

        orders.push(Order {
            order_id: order_id(),
            scheduled_date: date,
            lon,
            lat,
            city: base.name.clone(),
            service_time_min: SERVICE_TIMES_MIN[rng.random_range(0..SERVICE_TIMES_MIN.len())],
            priority: PRIORITIES[rng.random_range(0..PRIORITIES.len())],
            datetime_ingestion: ingested_at,
        });
    }

    orders
}

fn jitter(rng: &mut SmallRng, lon: f64, lat: f64, params: &GeneratorParams) -> (f64, f64) {
    let dlon = rng.random_range(-params.max_jitter_lon..=params.max_jitter_lon);
    let dlat = rng.random_range(-params.max_jitter_lat..=params.max_jitter_lat);
    (round6(lon + dlon), round6(lat + dlat))
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

fn order_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ord-{}", &hex[..8])
}
