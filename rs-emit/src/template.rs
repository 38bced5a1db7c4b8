use std::fs;
use std::path::Path;

use rs_model::{ModelFile, load_model_file, parse_model_file};

use crate::EmitError;

const BEHAVIOR_TEMPLATE: &str = include_str!("../templates/bp_entity.json");
const APPEARANCE_TEMPLATE: &str = include_str!("../templates/rp_entity.json");
const GEOMETRY_TEMPLATE: &str = include_str!("../templates/geo.json");

/// The fixed inputs every prefab is stamped out from.
#[derive(Debug, Clone)]
pub struct Templates {
    /// Behavior-pack entity, with `#{prefab}` and `#{body}` placeholders.
    pub behavior: String,
    /// Resource-pack client entity, with the same placeholders.
    pub appearance: String,
    /// Base model whose `model` bone receives each body's cubes.
    pub geometry: ModelFile,
}

impl Templates {
    pub fn builtin() -> Result<Self, EmitError> {
        Ok(Self {
            behavior: BEHAVIOR_TEMPLATE.to_string(),
            appearance: APPEARANCE_TEMPLATE.to_string(),
            geometry: parse_model_file(Path::new("templates/geo.json"), GEOMETRY_TEMPLATE)?,
        })
    }

    /// Built-in templates with any of the three swapped for a file on disk.
    pub fn with_overrides(
        behavior: Option<&Path>,
        appearance: Option<&Path>,
        geometry: Option<&Path>,
    ) -> Result<Self, EmitError> {
        let mut templates = Self::builtin()?;
        if let Some(path) = behavior {
            templates.behavior = read_template(path)?;
        }
        if let Some(path) = appearance {
            templates.appearance = read_template(path)?;
        }
        if let Some(path) = geometry {
            templates.geometry = load_model_file(path)?;
        }
        Ok(templates)
    }
}

fn read_template(path: &Path) -> Result<String, EmitError> {
    fs::read_to_string(path).map_err(|source| EmitError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces every `#{name}` with its value. The template is treated as plain text.
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("#{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_occurrence() {
        let out = substitute(
            "physics:#{prefab}.#{body} / #{prefab}",
            &[("prefab", "ragdoll"), ("body", "chest")],
        );
        assert_eq!(out, "physics:ragdoll.chest / ragdoll");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let out = substitute("#{prefab} #{other} {prefab}", &[("prefab", "boat")]);
        assert_eq!(out, "boat #{other} {prefab}");
    }

    #[test]
    fn builtin_templates_carry_placeholders() {
        let templates = Templates::builtin().unwrap();
        assert!(templates.behavior.contains("physics:#{prefab}.#{body}"));
        assert!(templates.appearance.contains("geometry.#{prefab}.#{body}"));
        assert!(
            templates.geometry.geometry[0]
                .bones
                .iter()
                .any(|b| b.name == crate::MODEL_BONE)
        );
    }

    #[test]
    fn overrides_replace_only_what_is_given() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bp.json");
        fs::write(&path, "{\"id\": \"#{prefab}\"}").unwrap();

        let templates = Templates::with_overrides(Some(&path), None, None).unwrap();
        assert_eq!(templates.behavior, "{\"id\": \"#{prefab}\"}");
        assert_eq!(templates.appearance, APPEARANCE_TEMPLATE);
    }

    #[test]
    fn missing_override_is_an_error() {
        let err = Templates::with_overrides(None, Some(Path::new("/nope/rp.json")), None)
            .unwrap_err();
        assert!(matches!(err, EmitError::TemplateRead { .. }));
    }
}
