//! Bedrock `minecraft:geometry` model files: typed loading and bone normalization.
//!
//! Only the fields the physics compiler reads are typed. Everything else a model
//! carries (texture sizes, visible bounds, uv maps, ...) is kept in `extra` maps so
//! a model can be written back out without losing data.

mod error;
mod loader;
mod normalize;
mod types;

pub use error::ModelError;
pub use loader::{load_model_file, parse_model_file};
pub use normalize::{NormalizedBone, normalize};
pub use types::{Bone, Cube, Description, Geometry, Locator, ModelFile};
