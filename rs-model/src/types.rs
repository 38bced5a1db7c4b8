use std::collections::BTreeMap;

use rs_utils::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub format_version: String,
    #[serde(rename = "minecraft:geometry")]
    pub geometry: Vec<Geometry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelFile {
    /// True when at least one bone is parented to a physics grouping bone.
    pub fn has_bones_under(&self, parents: &[&str]) -> bool {
        self.geometry.iter().any(|geo| {
            geo.bones
                .iter()
                .any(|bone| bone.parent.as_deref().is_some_and(|p| parents.contains(&p)))
        })
    }
}

/// One geometry definition: the source unit for a single prefab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub description: Description,
    pub bones: Vec<Bone>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub identifier: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Bone origin in model pixels. Bedrock treats a missing pivot as the origin.
    #[serde(default)]
    pub pivot: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locators: Option<BTreeMap<String, Locator>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cubes: Option<Vec<Cube>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Locators come either as a bare position or, in newer format versions, as an
/// object with an `offset` and optional rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Locator {
    Point(Vec3),
    Detailed {
        offset: Vec3,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Locator {
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Point(p) => *p,
            Self::Detailed { offset, .. } => *offset,
        }
    }

    pub fn position_mut(&mut self) -> &mut Vec3 {
        match self {
            Self::Point(p) => p,
            Self::Detailed { offset, .. } => offset,
        }
    }
}

impl From<Vec3> for Locator {
    fn from(value: Vec3) -> Self {
        Self::Point(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Lower corner in model pixels.
    pub origin: Vec3,
    pub size: Vec3,
    /// Euler rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    /// Rotation pivot of the cube itself, in the same space as `origin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Vec3>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cube {
    pub fn new(origin: Vec3, size: Vec3) -> Self {
        Self {
            origin,
            size,
            rotation: None,
            pivot: None,
            extra: Map::new(),
        }
    }
}
