//! Persisted storage for named matrices.
//!
//! Unset keys resolve to an identity matrix so callers always get a usable
//! value back.
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::StoreConfig;
use crate::math::Matrix;

pub trait MatrixStore {
    /// Stored matrix for `key`, or the store's default when unset.
    fn get(&self, key: &str) -> Result<Matrix>;

    fn set(&mut self, key: &str, matrix: &Matrix) -> Result<()>;
}

/// JSON object of `key -> [[...], ...]` kept in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    default: Matrix,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P, default_size: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            default: Matrix::identity(default_size),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.path, config.default_size)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Matrix>> {
        if !self.path.exists() {
            log::debug!("store {} does not exist yet", self.path.display());
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store: {}", self.path.display()))
    }
}

impl MatrixStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Matrix> {
        let mut entries = self.read_entries()?;
        match entries.remove(key) {
            Some(matrix) => Ok(matrix),
            None => {
                log::info!("No saved matrix under '{}', using default", key);
                Ok(self.default.clone())
            }
        }
    }

    fn set(&mut self, key: &str, matrix: &Matrix) -> Result<()> {
        if !matrix.is_finite() {
            bail!(
                "Refusing to save matrix with non-finite entries under '{}' in {}",
                key,
                self.path.display()
            );
        }
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), matrix.clone());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&entries)
            .with_context(|| format!("Failed to encode store: {}", self.path.display()))?;
        // Replace the store in one step so a failed write leaves it intact.
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json)
            .with_context(|| format!("Failed to write store: {}", staging.display()))?;
        std::fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;
        log::info!("Saved {}x{} matrix under '{}'", matrix.nrows(), matrix.ncols(), key);
        Ok(())
    }
}

/// In-process store with the same default semantics as [`JsonFileStore`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Matrix>,
    default: Matrix,
}

impl MemoryStore {
    pub fn new(default_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            default: Matrix::identity(default_size),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default().default_size)
    }
}

impl MatrixStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Matrix> {
        Ok(self.entries.get(key).unwrap_or(&self.default).clone())
    }

    fn set(&mut self, key: &str, matrix: &Matrix) -> Result<()> {
        if !matrix.is_finite() {
            bail!("Refusing to save matrix with non-finite entries under '{}'", key);
        }
        self.entries.insert(key.to_string(), matrix.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_defaults_to_identity() {
        let store = MemoryStore::default();
        assert_eq!(store.get("saved").unwrap(), Matrix::identity(3));
    }

    #[test]
    fn memory_store_keeps_values() {
        let mut store = MemoryStore::new(2);
        let m = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        store.set("saved", &m).unwrap();
        assert_eq!(store.get("saved").unwrap(), m);
        assert_eq!(store.get("other").unwrap(), Matrix::identity(2));
    }

    #[test]
    fn memory_store_rejects_non_finite() {
        let mut store = MemoryStore::default();
        let m = Matrix::from_rows(vec![vec![f64::NAN]]).unwrap();
        assert!(store.set("saved", &m).is_err());
        assert_eq!(store.get("saved").unwrap(), Matrix::identity(3));
    }
}
