use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::features::products::{Product, ProductAction};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to read products from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse products from '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads the product list from a JSON file, the way the web API would serve it.
pub struct ProductDataService;

impl ProductDataService {
    pub fn fetch(path: &Path) -> Result<Vec<Product>, ServiceError> {
        let content = fs::read_to_string(path).map_err(|e| ServiceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ServiceError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The follow-up action for a load request.
    pub fn load(path: &Path) -> ProductAction {
        match Self::fetch(path) {
            Ok(products) => ProductAction::LoadSuccess { products },
            Err(err) => {
                tracing::warn!(error = %err, "Product load failed");
                ProductAction::LoadFailure {
                    error: err.to_string(),
                }
            }
        }
    }
}
