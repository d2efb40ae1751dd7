//! JSON artifacts on disk.
//!
//! Layout under the data root:
//!
//! ```text
//! <root>/<year>.json          all twelve months, written only on full success
//! <root>/<year>/<month>.json  one month; its existence is the cache key
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PatroConfig;
use crate::error::PatroResult;
use crate::model::{MonthRecord, YearRecord};

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn from_config(config: &PatroConfig) -> Self {
        Self::new(config.data_path())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn month_path(&self, year: u16, month: u8) -> PathBuf {
        self.root.join(year.to_string()).join(format!("{month}.json"))
    }

    pub fn year_path(&self, year: u16) -> PathBuf {
        self.root.join(format!("{year}.json"))
    }

    pub fn has_month(&self, year: u16, month: u8) -> bool {
        self.month_path(year, month).exists()
    }

    /// Cached month, or `None` when it has never been written.
    pub fn load_month_if_cached(&self, year: u16, month: u8) -> PatroResult<Option<MonthRecord>> {
        let path = self.month_path(year, month);
        if !path.exists() {
            return Ok(None);
        }

        tracing::debug!(path = %path.display(), "loading cached month");
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save_month(&self, year: u16, month: u8, record: &MonthRecord) -> PatroResult<PathBuf> {
        let path = self.month_path(year, month);
        write_json(&path, record)?;
        Ok(path)
    }

    pub fn save_year(&self, year: u16, record: &YearRecord) -> PatroResult<PathBuf> {
        let path = self.year_path(year);
        write_json(&path, record)?;
        Ok(path)
    }

    /// Raw contents of the year aggregate, `None` if absent.
    pub fn read_year_json(&self, year: u16) -> PatroResult<Option<String>> {
        read_if_exists(&self.year_path(year))
    }

    /// Raw contents of one month, `None` if absent.
    pub fn read_month_json(&self, year: u16, month: u8) -> PatroResult<Option<String>> {
        read_if_exists(&self.month_path(year, month))
    }
}

/// Pretty JSON (2-space indent, non-ASCII kept literal), written through a
/// temp file so a reader never sees a partial artifact.
fn write_json<T: Serialize>(path: &Path, value: &T) -> PatroResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let temp = path.with_extension("json.tmp");

    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;

    tracing::debug!(path = %path.display(), "wrote artifact");
    Ok(())
}

fn read_if_exists(path: &Path) -> PatroResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
