use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{ModelError, ModelFile};

pub fn load_model_file(path: &Path) -> Result<ModelFile, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_model_file(path, &raw)
}

/// Parses model JSON. `path` is only used to label errors.
pub fn parse_model_file(path: &Path, raw: &str) -> Result<ModelFile, ModelError> {
    let model = serde_json::from_str::<ModelFile>(raw).map_err(|source| ModelError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "loaded {:?}: {} geometry definition(s)",
        path,
        model.geometry.len()
    );
    Ok(model)
}
