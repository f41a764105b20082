use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::civil::Date;

use crate::{
    error::DatasetError,
    order::{Order, Warehouse},
    sequence::RouteOrder,
};

pub const ORDERS_FILE_PREFIX: &str = "orders_pt_";
pub const ORDERS_FILE_SUFFIX: &str = ".csv";
pub const WAREHOUSE_FILE: &str = "warehouse_pt.csv";

/// Columns every point file must carry, whatever else it contains.
pub const REQUIRED_POINT_COLUMNS: [&str; 3] = ["lon", "lat", "city"];

pub fn orders_file_name(date: Date) -> String {
    format!("{ORDERS_FILE_PREFIX}{date}{ORDERS_FILE_SUFFIX}")
}

pub fn orders_path(bronze_dir: &Path, date: Date) -> PathBuf {
    bronze_dir.join(orders_file_name(date))
}

pub fn warehouse_path(bronze_dir: &Path) -> PathBuf {
    bronze_dir.join(WAREHOUSE_FILE)
}

pub fn write_orders(path: &Path, orders: &[Order]) -> Result<(), DatasetError> {
    let ioerr = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ioerr)?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(csverr)?;
    for order in orders {
        writer.serialize(order).map_err(csverr)?;
    }
    writer.flush().map_err(ioerr)?;

    Ok(())
}

pub fn write_warehouse(path: &Path, warehouse: &Warehouse) -> Result<(), DatasetError> {
    let ioerr = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ioerr)?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(csverr)?;
    writer.serialize(warehouse).map_err(csverr)?;
    writer.flush().map_err(ioerr)?;

    Ok(())
}

/// Full-schema read, for consolidation of generator output.
pub fn read_orders(path: &Path) -> Result<Vec<Order>, DatasetError> {
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csverr)?;
    reader.deserialize().collect::<Result<_, _>>().map_err(csverr)
}

/// Lenient read for the route stage: requires only the coordinate and city
/// columns and ignores everything else.
pub fn read_route_orders(path: &Path) -> Result<Vec<RouteOrder>, DatasetError> {
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csverr)?;
    check_columns(path, reader.headers().map_err(csverr)?)?;
    reader.deserialize().collect::<Result<_, _>>().map_err(csverr)
}

/// Only the first row counts; an empty file is an error.
pub fn read_warehouse(path: &Path) -> Result<Warehouse, DatasetError> {
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csverr)?;
    check_columns(path, reader.headers().map_err(csverr)?)?;
    match reader.deserialize().next() {
        Some(row) => row.map_err(csverr),
        None => Err(DatasetError::Empty {
            path: path.to_path_buf(),
        }),
    }
}

/// Every per-day order file under the bronze directory, sorted by name,
/// which is date order by construction.
pub fn list_order_files(bronze_dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let ioerr = |source| DatasetError::Io {
        path: bronze_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(bronze_dir).map_err(ioerr)? {
        let path = entry.map_err(ioerr)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.starts_with(ORDERS_FILE_PREFIX) && name.ends_with(ORDERS_FILE_SUFFIX) {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

fn check_columns(path: &Path, headers: &csv::StringRecord) -> Result<(), DatasetError> {
    let missing: Vec<String> = REQUIRED_POINT_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::order::Priority;

    fn test_order(id: &str, date: &str) -> Order {
        Order {
            order_id: id.to_string(),
            scheduled_date: date.parse().unwrap(),
            lon: -8.6291,
            lat: 41.1579,
            city: "porto".to_string(),
            service_time_min: 10,
            priority: Priority::Normal,
            datetime_ingestion: Timestamp::now(),
        }
    }

    fn test_warehouse() -> Warehouse {
        Warehouse {
            warehouse_id: "wh-porto-001".to_string(),
            name: "warehouse porto".to_string(),
            city: "porto".to_string(),
            lon: -8.6291,
            lat: 41.1579,
        }
    }

    #[test]
    fn test_orders_file_name() {
        let date = "2025-10-01".parse().unwrap();
        assert_eq!(orders_file_name(date), "orders_pt_2025-10-01.csv");
    }

    #[test]
    fn test_orders_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let date = "2025-10-01".parse().unwrap();
        let path = orders_path(dir.path(), date);
        let orders = vec![test_order("ord-1", "2025-10-01"), test_order("ord-2", "2025-10-01")];

        write_orders(&path, &orders).unwrap();
        let read_back = read_orders(&path).unwrap();

        assert_eq!(read_back.len(), 2);
        assert_eq!(read_back[0].order_id, "ord-1");
        assert_eq!(read_back[1].city, "porto");
    }

    #[test]
    fn test_route_orders_tolerate_missing_order_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "lon,lat,city\n-8.6,41.1,porto\n").unwrap();

        let orders = read_route_orders(&path).unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "");
        assert_eq!(orders[0].city, "porto");
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "lon,city\n-8.6,porto\n").unwrap();

        let result = read_route_orders(&path);

        match result {
            Err(DatasetError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["lat".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_warehouse_uses_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = warehouse_path(dir.path());
        write_warehouse(&path, &test_warehouse()).unwrap();

        let warehouse = read_warehouse(&path).unwrap();

        assert_eq!(warehouse.city, "porto");
        assert_eq!(warehouse.warehouse_id, "wh-porto-001");
    }

    #[test]
    fn test_empty_warehouse_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.csv");
        fs::write(&path, "warehouse_id,name,city,lon,lat\n").unwrap();

        assert!(matches!(
            read_warehouse(&path),
            Err(DatasetError::Empty { .. })
        ));
    }

    #[test]
    fn test_list_order_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("orders_pt_2025-10-02.csv"), "x\n").unwrap();
        fs::write(dir.path().join("orders_pt_2025-10-01.csv"), "x\n").unwrap();
        fs::write(dir.path().join("warehouse_pt.csv"), "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "x\n").unwrap();

        let files = list_order_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["orders_pt_2025-10-01.csv", "orders_pt_2025-10-02.csv"]
        );
    }
}
