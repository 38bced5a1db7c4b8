use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Artifact, EmitError};

/// `create_dir_all`, which already treats an existing directory as success.
pub fn ensure_dir(path: &Path) -> Result<(), EmitError> {
    fs::create_dir_all(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes artifacts under `root`, creating parent directories as needed.
/// Returns the absolute paths written, in order.
pub fn write_artifacts(root: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, EmitError> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(&path, &artifact.contents).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("wrote {:?}", path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_paths() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = vec![
            Artifact {
                path: PathBuf::from("a/b/c.json"),
                contents: "{}".to_string(),
            },
            Artifact {
                path: PathBuf::from("index.js"),
                contents: "import \"./c\";".to_string(),
            },
        ];
        let written = write_artifacts(dir.path(), &artifacts).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("a/b/c.json")).unwrap(), "{}");
        assert!(written[1].ends_with("index.js"));
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x/y");
        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn write_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();
        let artifacts = vec![Artifact {
            path: PathBuf::from("blocker/inner.json"),
            contents: String::new(),
        }];
        let err = write_artifacts(dir.path(), &artifacts).unwrap_err();
        match err {
            EmitError::Io { path, .. } => assert!(path.ends_with("blocker")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
