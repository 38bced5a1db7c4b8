use std::collections::BTreeMap;

use rs_utils::{Vec3, sub};
use serde_json::{Map, Value};

use crate::{Bone, Cube, Locator};

/// A bone whose cubes and locators are expressed relative to its own pivot.
///
/// Only [`normalize`] produces this type, so a bone cannot be re-centred twice.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBone {
    pub name: String,
    pub parent: Option<String>,
    /// The bone pivot, still in model space.
    pub pivot: Vec3,
    pub locators: BTreeMap<String, Locator>,
    pub cubes: Vec<Cube>,
    pub extra: Map<String, Value>,
}

/// Translates every cube and locator of `bone` by `-pivot`. Rotations are untouched.
pub fn normalize(bone: Bone) -> NormalizedBone {
    let Bone {
        name,
        parent,
        pivot,
        locators,
        cubes,
        extra,
    } = bone;

    let mut cubes = cubes.unwrap_or_default();
    for cube in &mut cubes {
        cube.origin = sub(cube.origin, pivot);
        if let Some(cube_pivot) = cube.pivot.as_mut() {
            *cube_pivot = sub(*cube_pivot, pivot);
        }
    }

    let mut locators = locators.unwrap_or_default();
    for locator in locators.values_mut() {
        let pos = locator.position_mut();
        *pos = sub(*pos, pivot);
    }

    NormalizedBone {
        name,
        parent,
        pivot,
        locators,
        cubes,
        extra,
    }
}
