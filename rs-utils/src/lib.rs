use std::path::{Path, PathBuf};

pub mod units;
pub use units::{PX, TO_RAD, Vec3, add, model_to_world, scale, sub};

pub const PREFAB_ROOT_ENV: &str = "PHYSICS_PREFAB_ROOT";

pub const DEFAULT_SOURCE_DIR: &str = "RP/models/entity/physics/prefabs";
pub const DEFAULT_BEHAVIOR_DIR: &str = "BP/entities/physics/prefabs";
pub const DEFAULT_APPEARANCE_DIR: &str = "RP/entity/physics/prefabs";
pub const DEFAULT_GEOMETRY_DIR: &str = "RP/models/entity/physics/prefabs";
pub const DEFAULT_SCRIPT_DIR: &str = "data/gametests/src/prefabs";

/// Resolves the add-on project root the compiler reads from and writes into.
///
/// An explicit path wins, then `PHYSICS_PREFAB_ROOT`, then the working directory.
pub fn prefab_project_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Ok(from_env) = std::env::var(PREFAB_ROOT_ENV)
        && !from_env.is_empty()
    {
        let path = PathBuf::from(from_env);
        if path.exists() {
            return path;
        }
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Turns an arbitrary bone name into something usable as a JavaScript identifier.
pub fn js_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let ok = c == '_' || c == '$' || c.is_ascii_alphanumeric();
        if i == 0 && c.is_ascii_digit() {
            out.push('_');
        }
        out.push(if ok { c } else { '_' });
    }
    out
}
