use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parquet::{
    file::{properties::WriterProperties, writer::SerializedFileWriter},
    record::RecordWriter,
};
use parquet_derive::ParquetRecordWriter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{bronze, error::DatasetError, order::Order};

pub const CONSOLIDATED_PARQUET: &str = "orders_all.parquet";
pub const CONSOLIDATED_CSV: &str = "orders_all.csv";

/// One consolidated row: the order columns plus the bronze file it came
/// from. Dates and timestamps are kept as their ISO strings so the same
/// struct serves both output formats.
#[derive(Debug, Clone, Serialize, Deserialize, ParquetRecordWriter)]
pub struct ConsolidatedOrder {
    pub order_id: String,
    pub scheduled_date: String,
    pub lon: f64,
    pub lat: f64,
    pub city: String,
    pub service_time_min: i64,
    pub priority: String,
    pub datetime_ingestion: String,
    pub source_file: String,
}

impl ConsolidatedOrder {
    fn from_order(order: Order, source_file: String) -> Self {
        Self {
            order_id: order.order_id,
            scheduled_date: order.scheduled_date.to_string(),
            lon: order.lon,
            lat: order.lat,
            city: order.city,
            service_time_min: order.service_time_min,
            priority: order.priority.as_str().to_string(),
            datetime_ingestion: order.datetime_ingestion.to_string(),
            source_file,
        }
    }
}

#[derive(Debug)]
pub struct ConsolidateSummary {
    pub files: usize,
    pub rows: usize,
    pub parquet_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Unions every per-day file under `bronze_dir` into one table sorted by
/// (scheduled_date, order_id) and writes it in columnar and flat form.
/// Matching no files at all is an error.
pub fn consolidate(bronze_dir: &Path, silver_dir: &Path) -> Result<ConsolidateSummary, DatasetError> {
    let files = bronze::list_order_files(bronze_dir)?;
    if files.is_empty() {
        return Err(DatasetError::NoOrderFiles {
            dir: bronze_dir.to_path_buf(),
        });
    }

    let mut rows: Vec<ConsolidatedOrder> = Vec::new();
    for path in &files {
        let orders = bronze::read_orders(path)?;
        debug!("read {} rows from {}", orders.len(), path.display());

        let source = path.display().to_string();
        rows.extend(
            orders
                .into_iter()
                .map(|order| ConsolidatedOrder::from_order(order, source.clone())),
        );
    }

    rows.sort_by(|a, b| {
        (a.scheduled_date.as_str(), a.order_id.as_str())
            .cmp(&(b.scheduled_date.as_str(), b.order_id.as_str()))
    });

    fs::create_dir_all(silver_dir).map_err(|source| DatasetError::Io {
        path: silver_dir.to_path_buf(),
        source,
    })?;

    let parquet_path = silver_dir.join(CONSOLIDATED_PARQUET);
    let csv_path = silver_dir.join(CONSOLIDATED_CSV);
    write_parquet(&parquet_path, &rows)?;
    write_csv(&csv_path, &rows)?;

    Ok(ConsolidateSummary {
        files: files.len(),
        rows: rows.len(),
        parquet_path,
        csv_path,
    })
}

fn write_parquet(path: &Path, rows: &[ConsolidatedOrder]) -> Result<(), DatasetError> {
    let perr = |source| DatasetError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let ioerr = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let schema = rows.schema().map_err(perr)?;
    let file = fs::File::create(path).map_err(ioerr)?;
    let props = Arc::new(WriterProperties::builder().build());

    let mut writer = SerializedFileWriter::new(file, schema, props).map_err(perr)?;
    let mut row_group = writer.next_row_group().map_err(perr)?;
    rows.write_to_row_group(&mut row_group).map_err(perr)?;
    row_group.close().map_err(perr)?;
    writer.close().map_err(perr)?;

    Ok(())
}

fn write_csv(path: &Path, rows: &[ConsolidatedOrder]) -> Result<(), DatasetError> {
    let csverr = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csverr)?;
    for row in rows {
        writer.serialize(row).map_err(csverr)?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
