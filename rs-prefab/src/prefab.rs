use rs_model::{Geometry, ModelFile, normalize};
use tracing::{debug, warn};

use crate::{
    Body, BoneRole, ConstraintError, Prefab, build_body, build_constraint, classify,
};

const GEOMETRY_PREFIX: &str = "geometry.";

/// `geometry.ragdoll` -> `ragdoll`
pub fn prefab_id(identifier: &str) -> &str {
    identifier
        .strip_prefix(GEOMETRY_PREFIX)
        .unwrap_or(identifier)
}

/// A constraint bone that declared a constraint which could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedConstraint {
    pub prefab: String,
    pub constraint: String,
    pub reason: ConstraintError,
}

/// Everything compiled so far in one run.
#[derive(Debug, Default)]
pub struct CompileContext {
    pub prefabs: Vec<Prefab>,
    pub skipped: Vec<SkippedConstraint>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model(&mut self, model: ModelFile) {
        for geometry in model.geometry {
            self.add_geometry(geometry);
        }
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> &Prefab {
        let (prefab, skipped) = assemble_prefab(geometry);

        let slot = match self.prefabs.iter().position(|p| p.id == prefab.id) {
            Some(idx) => {
                warn!(
                    "prefab `{}` is defined more than once, keeping the last definition",
                    prefab.id
                );
                self.skipped.retain(|s| s.prefab != prefab.id);
                self.prefabs[idx] = prefab;
                idx
            }
            None => {
                self.prefabs.push(prefab);
                self.prefabs.len() - 1
            }
        };
        self.skipped.extend(skipped);
        &self.prefabs[slot]
    }

    pub fn prefab(&self, id: &str) -> Option<&Prefab> {
        self.prefabs.iter().find(|p| p.id == id)
    }
}

/// Compiles every geometry definition of one model file.
pub fn compile_model(model: ModelFile) -> CompileContext {
    let mut ctx = CompileContext::new();
    ctx.add_model(model);
    ctx
}

/// Turns one geometry definition into a prefab.
///
/// All bodies are built before any constraint, so constraints may reference
/// bodies that come later in bone order.
pub fn assemble_prefab(geometry: Geometry) -> (Prefab, Vec<SkippedConstraint>) {
    let id = prefab_id(&geometry.description.identifier).to_string();

    let mut body_bones = Vec::new();
    let mut constraint_bones = Vec::new();
    for bone in geometry.bones {
        let bone = normalize(bone);
        match classify(&bone) {
            BoneRole::Body => body_bones.push(bone),
            BoneRole::Constraint => constraint_bones.push(bone),
            BoneRole::Ignored => {}
        }
    }

    let mut bodies: Vec<Body> = Vec::with_capacity(body_bones.len());
    for bone in &body_bones {
        if bodies.iter().any(|b| b.id == bone.name) {
            warn!("{id}: duplicate body bone `{}` ignored", bone.name);
            continue;
        }
        bodies.push(build_body(bone));
    }

    let mut constraints = Vec::new();
    let mut skipped = Vec::new();
    for bone in &constraint_bones {
        match build_constraint(bone, &bodies) {
            Ok(Some(constraint)) => {
                debug!(
                    "{id}: {} constraint `{}` links `{}` to `{}`",
                    constraint.kind.name(),
                    constraint.id,
                    constraint.body_a,
                    constraint.body_b
                );
                constraints.push(constraint);
            }
            Ok(None) => {}
            Err(reason) => {
                warn!("{id}: dropping constraint `{}`: {reason}", bone.name);
                skipped.push(SkippedConstraint {
                    prefab: id.clone(),
                    constraint: bone.name.clone(),
                    reason,
                });
            }
        }
    }

    debug!(
        "{id}: {} bodies, {} constraints",
        bodies.len(),
        constraints.len()
    );
    (
        Prefab {
            id,
            bodies,
            constraints,
        },
        skipped,
    )
}
