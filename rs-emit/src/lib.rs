//! Turns compiled prefabs into add-on files.
//!
//! Each body with cubes gets a behavior entity, a client entity and a geometry
//! model. Each prefab gets one instantiation script for the `cannon-es` runtime,
//! and the run gets an index script importing all of them. Emitters only build
//! [`Artifact`]s; [`write_artifacts`] puts them on disk.

mod error;
mod geometry;
mod index;
mod layout;
mod script;
mod template;
mod writer;

pub use error::EmitError;
pub use geometry::{MODEL_BONE, emit_geometry};
pub use index::emit_index;
pub use layout::{Artifact, Emitter, OutputLayout};
pub use script::{DEFAULT_MASS, emit_script};
pub use template::{Templates, substitute};
pub use writer::{ensure_dir, write_artifacts};
