use std::path::{Component, Path, PathBuf};

use rs_prefab::Prefab;
use rs_utils::{
    DEFAULT_APPEARANCE_DIR, DEFAULT_BEHAVIOR_DIR, DEFAULT_GEOMETRY_DIR, DEFAULT_SCRIPT_DIR,
};
use tracing::warn;

use crate::{DEFAULT_MASS, EmitError, Templates, emit_geometry, emit_index, emit_script, substitute};

/// One output file, with a path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

/// Where each kind of artifact goes, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub behavior_dir: PathBuf,
    pub appearance_dir: PathBuf,
    pub geometry_dir: PathBuf,
    pub script_dir: PathBuf,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            behavior_dir: PathBuf::from(DEFAULT_BEHAVIOR_DIR),
            appearance_dir: PathBuf::from(DEFAULT_APPEARANCE_DIR),
            geometry_dir: PathBuf::from(DEFAULT_GEOMETRY_DIR),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
        }
    }
}

impl OutputLayout {
    pub fn dirs(&self) -> [&PathBuf; 4] {
        [
            &self.behavior_dir,
            &self.appearance_dir,
            &self.geometry_dir,
            &self.script_dir,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Emitter {
    pub layout: OutputLayout,
    pub templates: Templates,
    pub default_mass: f64,
}

impl Emitter {
    pub fn new(layout: OutputLayout, templates: Templates) -> Self {
        Self {
            layout,
            templates,
            default_mass: DEFAULT_MASS,
        }
    }

    pub fn with_default_mass(mut self, mass: f64) -> Self {
        self.default_mass = mass;
        self
    }

    /// All files for one prefab: three per visual body, then its script.
    ///
    /// Prefab and body ids become file names, so each must be a single plain
    /// path component.
    pub fn emit_prefab(&self, prefab: &Prefab) -> Result<Vec<Artifact>, EmitError> {
        file_stem(&prefab.id)?;
        let mut out = Vec::with_capacity(prefab.bodies.len() * 3 + 1);
        for body in prefab.bodies.iter().filter(|b| b.is_visual()) {
            let vars = [("prefab", prefab.id.as_str()), ("body", body.id.as_str())];
            let file = format!("{}.json", file_stem(&body.id)?);

            out.push(Artifact {
                path: self.layout.behavior_dir.join(&prefab.id).join(&file),
                contents: substitute(&self.templates.behavior, &vars),
            });
            out.push(Artifact {
                path: self.layout.appearance_dir.join(&prefab.id).join(&file),
                contents: substitute(&self.templates.appearance, &vars),
            });
            out.push(Artifact {
                path: self.layout.geometry_dir.join(&prefab.id).join(&file),
                contents: emit_geometry(&self.templates.geometry, &prefab.id, body)?,
            });
        }
        out.push(Artifact {
            path: self.layout.script_dir.join(format!("{}.js", prefab.id)),
            contents: emit_script(prefab, self.default_mass)?,
        });
        Ok(out)
    }

    pub fn emit_index(&self, prefabs: &[Prefab]) -> Artifact {
        Artifact {
            path: self.layout.script_dir.join("index.js"),
            contents: emit_index(prefabs),
        }
    }
}

fn file_stem(id: &str) -> Result<&str, EmitError> {
    let mut components = Path::new(id).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single && !id.contains(['/', '\\']) {
        Ok(id)
    } else {
        warn!("refusing to use `{id}` as a file name");
        Err(EmitError::UnsafeId(id.to_string()))
    }
}
