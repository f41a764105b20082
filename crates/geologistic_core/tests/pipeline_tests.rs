use geologistic_core::{
    bronze,
    city::{portugal_cities, warehouse_for},
    generate::{DEFAULT_SEED, GeneratorParams, daterange, generate_day},
    silver,
};
use jiff::{Timestamp, civil::Date};
use rand::{SeedableRng, rngs::SmallRng};

fn day(s: &str) -> Date {
    s.parse().unwrap()
}

#[test]
fn test_generate_then_consolidate_three_days() {
    let dir = tempfile::tempdir().unwrap();
    let bronze_dir = dir.path().join("bronze");
    let silver_dir = dir.path().join("silver");

    let cities = portugal_cities();
    let warehouse = warehouse_for(&cities).unwrap();
    let params = GeneratorParams::default();
    let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
    let ingested_at = Timestamp::now();

    let start = day("2025-10-01");
    let end = day("2025-10-03");
    let mut total_rows = 0;
    for date in daterange(start, end) {
        let orders = generate_day(&mut rng, date, &cities, &params, ingested_at);
        assert!((5..=15).contains(&orders.len()));
        bronze::write_orders(&bronze::orders_path(&bronze_dir, date), &orders).unwrap();
        total_rows += orders.len();
    }
    bronze::write_warehouse(&bronze::warehouse_path(&bronze_dir), &warehouse).unwrap();

    let files = bronze::list_order_files(&bronze_dir).unwrap();
    assert_eq!(files.len(), 3);

    let read_back = bronze::read_warehouse(&bronze::warehouse_path(&bronze_dir)).unwrap();
    assert_eq!(read_back.city, "porto");

    let summary = silver::consolidate(&bronze_dir, &silver_dir).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.rows, total_rows);

    // sorted by (scheduled_date, order_id)
    let mut reader = csv::Reader::from_path(&summary.csv_path).unwrap();
    let keys: Vec<(String, String)> = reader
        .deserialize::<silver::ConsolidatedOrder>()
        .map(|row| {
            let row = row.unwrap();
            (row.scheduled_date, row.order_id)
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_generated_orders_route_as_points() {
    let cities = portugal_cities();
    let params = GeneratorParams::default();
    let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);

    let orders = generate_day(
        &mut rng,
        day("2025-10-01"),
        &cities,
        &params,
        Timestamp::now(),
    );

    for order in &orders {
        let point = geo_types::Point::from(order);
        assert!(point.x().is_finite());
        assert!(point.y().is_finite());
        // mainland Portugal, give or take the jitter
        assert!((-10.0..=-6.0).contains(&point.x()));
        assert!((36.0..=43.0).contains(&point.y()));
    }
}
