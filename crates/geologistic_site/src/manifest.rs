use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Days whose pages were actually published. The landing page derives from
/// this record, not from raw presence of bronze data, so it cannot list a
/// day whose page was never built.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Manifest {
    days: BTreeSet<Date>,
}

impl Manifest {
    pub fn path(site_dir: &Path) -> PathBuf {
        site_dir.join(MANIFEST_FILE)
    }

    /// A missing file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SiteError> {
        let ioerr = |source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ioerr)?;
        }

        let raw = serde_json::to_string_pretty(self).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, raw).map_err(ioerr)
    }

    /// Returns false when the day was already recorded.
    pub fn record(&mut self, day: Date) -> bool {
        self.days.insert(day)
    }

    /// Published days, ascending.
    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        self.days.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
