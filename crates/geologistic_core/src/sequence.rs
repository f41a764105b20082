use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::DatasetError, order::Warehouse};

/// One input row for the route stage. Only the coordinate and city columns
/// are required; `order_id` is carried through when present.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteOrder {
    #[serde(default)]
    pub order_id: String,
    pub city: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<&RouteOrder> for geo_types::Point {
    fn from(order: &RouteOrder) -> Self {
        geo_types::Point::new(order.lon, order.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Warehouse,
    Order,
}

/// One stop of the computed round trip, in visiting order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub rank: usize,
    pub stop_type: StopKind,
    pub order_id: String,
    pub city: String,
    pub lon: f64,
    pub lat: f64,
}

/// Maps the routing service's visiting order back onto the input records.
///
/// `visit_ranks[i]` is the rank the service assigned to input point `i`,
/// where point 0 is the warehouse and point `i > 0` is `orders[i - 1]`. The
/// ranks must form a permutation of the input points.
pub fn sequence_stops(
    warehouse: &Warehouse,
    orders: &[RouteOrder],
    visit_ranks: &[usize],
) -> Result<Vec<StopRecord>, DatasetError> {
    let expected = orders.len() + 1;
    if visit_ranks.len() != expected {
        return Err(DatasetError::InvalidWaypoints { expected });
    }

    let mut slots: Vec<Option<StopRecord>> = vec![None; expected];
    for (input_idx, &rank) in visit_ranks.iter().enumerate() {
        if rank >= expected || slots[rank].is_some() {
            return Err(DatasetError::InvalidWaypoints { expected });
        }

        let record = if input_idx == 0 {
            StopRecord {
                rank: rank + 1,
                stop_type: StopKind::Warehouse,
                order_id: String::new(),
                city: warehouse.city.clone(),
                lon: warehouse.lon,
                lat: warehouse.lat,
            }
        } else {
            let order = &orders[input_idx - 1];
            StopRecord {
                rank: rank + 1,
                stop_type: StopKind::Order,
                order_id: order.order_id.clone(),
                city: order.city.clone(),
                lon: order.lon,
                lat: order.lat,
            }
        };
        slots[rank] = Some(record);
    }

    Ok(slots.into_iter().flatten().collect())
}

pub fn write_sequence(path: &Path, stops: &[StopRecord]) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    for stop in stops {
        writer.serialize(stop).map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
