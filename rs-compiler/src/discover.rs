use std::fs;
use std::path::{Path, PathBuf};

use crate::CompileError;

/// Every `*.json` file under `dir`, recursively, sorted by path.
pub fn discover_sources(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| CompileError::io(&current, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| CompileError::io(&current, source))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|source| CompileError::io(&path, source))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "json") {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}
