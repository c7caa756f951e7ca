use anyhow::{Context, Result};

use matrixkit::store::MatrixStore;
use matrixkit::Matrix;

/// Prefix that names a stored matrix instead of an inline JSON literal.
pub const STORE_PREFIX: char = '@';

/// Resolve a command-line operand to a matrix.
///
/// `@name` reads `name` from `store` (`@` alone reads `default_key`); anything
/// else is parsed as a JSON array of rows.
pub fn parse_operand(raw: &str, store: &dyn MatrixStore, default_key: &str) -> Result<Matrix> {
    let raw = raw.trim();
    if let Some(key) = raw.strip_prefix(STORE_PREFIX) {
        let key = if key.is_empty() { default_key } else { key };
        log::debug!("Loading operand from store key '{}'", key);
        return store.get(key);
    }
    serde_json::from_str(raw).with_context(|| format!("Invalid matrix literal: {}", raw))
}
