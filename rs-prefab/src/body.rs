use rs_model::{Cube, NormalizedBone};
use rs_utils::{TO_RAD, add, model_to_world, scale};

use crate::locator::{decode_number, option};
use crate::{Body, Shape, ShapeKind};

/// Builds the rigid body for a bone under `Objects`. Every cube becomes a box;
/// mass and friction stay unset unless a locator provides them.
pub fn build_body(bone: &NormalizedBone) -> Body {
    let shapes = bone.cubes.iter().map(cube_shape).collect();

    Body {
        id: bone.name.clone(),
        offset: model_to_world(bone.pivot),
        shapes,
        cubes: bone.cubes.clone(),
        mass: option(&bone.locators, "mass").and_then(decode_number),
        friction: option(&bone.locators, "friction").and_then(decode_number),
        locators: bone.locators.clone(),
    }
}

fn cube_shape(cube: &Cube) -> Shape {
    let half_extents = scale(model_to_world(cube.size), 0.5);
    // cube origins are the min corner; boxes are centred
    let offset = add(model_to_world(cube.origin), half_extents);
    let orientation = cube
        .rotation
        .map(|r| scale(r, TO_RAD))
        .unwrap_or([0.0; 3]);

    Shape {
        offset,
        orientation,
        kind: ShapeKind::Box { half_extents },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rs_model::{Bone, Locator, normalize};
    use serde_json::Map;

    use super::*;

    fn body_bone(pivot: [f64; 3], locators: &[&str], cubes: Vec<Cube>) -> NormalizedBone {
        let locators = locators
            .iter()
            .map(|name| (name.to_string(), Locator::Point(pivot)))
            .collect::<BTreeMap<_, _>>();
        normalize(Bone {
            name: "crate".to_string(),
            parent: Some("Objects".to_string()),
            pivot,
            locators: Some(locators),
            cubes: Some(cubes),
            extra: Map::new(),
        })
    }

    #[test]
    fn single_block_body() {
        let bone = body_bone(
            [0.0, 0.0, 0.0],
            &["mass_3", "friction_0_2"],
            vec![Cube::new([0.0, 0.0, 0.0], [16.0, 16.0, 16.0])],
        );
        let body = build_body(&bone);

        assert_eq!(body.id, "crate");
        assert_eq!(body.mass, Some(3.0));
        assert_eq!(body.friction, Some(0.2));
        assert_eq!(body.shapes.len(), 1);
        assert_eq!(body.shapes[0].offset, [0.5, 0.5, 0.5]);
        assert_eq!(body.shapes[0].orientation, [0.0, 0.0, 0.0]);
        assert_eq!(
            body.shapes[0].kind,
            ShapeKind::Box {
                half_extents: [0.5, 0.5, 0.5]
            }
        );
        assert!(body.is_visual());
    }

    #[test]
    fn offset_is_pivot_in_world_units() {
        let bone = body_bone(
            [16.0, 32.0, -8.0],
            &[],
            vec![Cube::new([16.0, 32.0, -8.0], [8.0, 4.0, 2.0])],
        );
        let body = build_body(&bone);
        assert_eq!(body.offset, [1.0, 2.0, -0.5]);
        assert_eq!(body.shapes[0].offset, [0.25, 0.125, 0.0625]);
        assert_eq!(body.cubes[0].origin, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn rotation_becomes_radians() {
        let mut cube = Cube::new([0.0; 3], [2.0, 2.0, 2.0]);
        cube.rotation = Some([90.0, 0.0, -180.0]);
        let body = build_body(&body_bone([0.0; 3], &[], vec![cube]));
        let [x, y, z] = body.shapes[0].orientation;
        assert!((x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(y, 0.0);
        assert!((z + std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn missing_options_stay_unset() {
        let body = build_body(&body_bone([0.0; 3], &["mass_heavy"], Vec::new()));
        assert_eq!(body.mass, None);
        assert_eq!(body.friction, None);
        assert!(body.shapes.is_empty());
        assert!(!body.is_visual());
        assert!(body.locators.contains_key("mass_heavy"));
    }
}
