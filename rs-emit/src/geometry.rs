use rs_model::ModelFile;
use rs_prefab::Body;

use crate::EmitError;

/// Name of the template bone that receives a body's cubes.
pub const MODEL_BONE: &str = "model";

/// Clones the geometry template for one body. Cubes are already pivot-relative,
/// which is what the template's zero-pivot `model` bone expects.
pub fn emit_geometry(
    template: &ModelFile,
    prefab_id: &str,
    body: &Body,
) -> Result<String, EmitError> {
    let mut model = template.clone();
    let geo = model
        .geometry
        .first_mut()
        .ok_or(EmitError::TemplateGeometryMissing)?;
    geo.description.identifier = format!("geometry.{prefab_id}.{}", body.id);

    let bone = geo
        .bones
        .iter_mut()
        .find(|b| b.name == MODEL_BONE)
        .ok_or(EmitError::TemplateBoneMissing(MODEL_BONE))?;
    bone.cubes = Some(body.cubes.clone());

    Ok(serde_json::to_string_pretty(&model)?)
}
