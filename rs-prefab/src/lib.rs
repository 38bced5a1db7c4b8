//! Compiles normalized model bones into physics prefabs.
//!
//! Bones parented to `Objects` become rigid bodies, bones parented to
//! `Constraints` become joints between them. Everything else in a model is
//! visual-only and ignored here. Options ride on locator names, see [`locator`].

mod body;
mod classify;
mod constraint;
pub mod locator;
mod prefab;
mod types;

pub use body::build_body;
pub use classify::{BODY_PARENT, BoneRole, CONSTRAINT_PARENT, classify};
pub use constraint::{ConstraintError, build_constraint};
pub use prefab::{CompileContext, SkippedConstraint, assemble_prefab, compile_model, prefab_id};
pub use types::{Body, Constraint, ConstraintKind, HingeParams, Prefab, Shape, ShapeKind};
