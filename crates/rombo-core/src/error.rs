use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RomboError {
    #[error("failed to load inventory from {path}: {reason}")]
    InventoryLoad { path: PathBuf, reason: String },

    #[error("failed to parse inventory: {0}")]
    ParseError(String),

    #[error("unsupported inventory format: {0}. Supported formats are .json and .xlsx")]
    UnsupportedFormat(String),

    #[error("no inventory item with id or product name '{0}'")]
    ItemNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
