use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How the elimination engine chooses a pivot row within the lead column.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Pivoting {
    /// First row at or below the cursor whose lead entry is nonzero.
    #[default]
    #[serde(rename = "first-nonzero")]
    FirstNonZero,
    /// Row with the largest magnitude lead entry (partial pivoting).
    Partial,
}

impl FromStr for Pivoting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-nonzero" | "first_nonzero" => Ok(Pivoting::FirstNonZero),
            "partial" => Ok(Pivoting::Partial),
            _ => Err(format!(
                "Unknown pivoting strategy: {}. Expected 'first-nonzero' or 'partial'",
                s
            )),
        }
    }
}

/// Where and how the saved matrix is persisted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub key: String,
    /// Side of the identity matrix returned for an unset key.
    pub default_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("matrixkit-store.json"),
            key: "saved".to_string(),
            default_size: 3,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MatrixConfig {
    pub pivoting: Pivoting,
    pub store: StoreConfig,
}

/// Load a configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MatrixConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: MatrixConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    log::debug!("Loaded config from {}: {:?}", path.as_ref().display(), config);
    Ok(config)
}
