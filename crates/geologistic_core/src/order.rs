use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

/// One synthetic delivery order. Written once by the generator and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub scheduled_date: Date,
    pub lon: f64,
    pub lat: f64,
    pub city: String,
    pub service_time_min: i64,
    pub priority: Priority,
    pub datetime_ingestion: Timestamp,
}

/// The single active warehouse. Downstream readers only need the coordinate
/// and city columns, so the identity columns default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default)]
    pub warehouse_id: String,
    #[serde(default)]
    pub name: String,
    pub city: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<&Order> for geo_types::Point {
    fn from(order: &Order) -> Self {
        geo_types::Point::new(order.lon, order.lat)
    }
}

impl From<&Warehouse> for geo_types::Point {
    fn from(warehouse: &Warehouse) -> Self {
        geo_types::Point::new(warehouse.lon, warehouse.lat)
    }
}
