use std::collections::BTreeMap;

use rs_model::{Cube, Locator};
use rs_utils::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefab {
    pub id: String,
    pub bodies: Vec<Body>,
    pub constraints: Vec<Constraint>,
}

impl Prefab {
    pub fn body(&self, id: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub id: String,
    /// Bone pivot in world units, relative to the prefab spawn position.
    pub offset: Vec3,
    pub shapes: Vec<Shape>,
    /// Pivot-relative cubes in model pixels, for the visual geometry.
    pub cubes: Vec<Cube>,
    pub mass: Option<f64>,
    pub friction: Option<f64>,
    /// Pivot-relative locators, kept for resolving constraint pivots by name.
    #[serde(skip)]
    pub locators: BTreeMap<String, Locator>,
}

impl Body {
    /// Bodies without cubes are invisible attachment points: no entity, no model.
    pub fn is_visual(&self) -> bool {
        !self.cubes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    /// Centre of the shape relative to the body, in world units.
    pub offset: Vec3,
    /// Euler angles in radians.
    pub orientation: Vec3,
    pub kind: ShapeKind,
}

/// Only boxes today: cubes are the one primitive a Bedrock model has.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Box { half_extents: Vec3 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub id: String,
    pub body_a: String,
    pub body_b: String,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConstraintKind {
    Distance {
        distance: f64,
        max_force: Option<f64>,
    },
    Lock {
        max_force: Option<f64>,
    },
    Hinge(HingeParams),
    Twist {
        #[serde(flatten)]
        hinge: HingeParams,
        /// Cone angle in degrees.
        angle: f64,
        /// Twist angle in degrees.
        twist_angle: f64,
    },
    Point {
        pivot_a: Vec3,
        pivot_b: Vec3,
        max_force: Option<f64>,
    },
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Distance { .. } => "distance",
            Self::Lock { .. } => "lock",
            Self::Hinge(_) => "hinge",
            Self::Twist { .. } => "twist",
            Self::Point { .. } => "point",
        }
    }
}

/// Pivots are in world units relative to their own body; axes are unit-free.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HingeParams {
    pub pivot_a: Vec3,
    pub pivot_b: Vec3,
    pub axis_a: Vec3,
    pub axis_b: Vec3,
    pub max_force: Option<f64>,
    pub collide_connected: bool,
}
