use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid geometry template: {0}")]
    TemplateModel(#[from] rs_model::ModelError),

    #[error("geometry template has no geometry definition")]
    TemplateGeometryMissing,

    #[error("geometry template has no `{0}` bone")]
    TemplateBoneMissing(&'static str),

    #[error("failed to serialize geometry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to format script: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("`{0}` cannot be used as a file name")]
    UnsafeId(String),
}
