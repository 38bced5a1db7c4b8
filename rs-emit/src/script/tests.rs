use std::collections::BTreeMap;

use rs_model::Cube;
use rs_prefab::{Body, Constraint, ConstraintKind, HingeParams, Prefab, Shape, ShapeKind};

use super::*;

fn body(id: &str, offset: Vec3, visual: bool) -> Body {
    Body {
        id: id.to_string(),
        offset,
        shapes: vec![Shape {
            offset: [0.0, 0.5, 0.0],
            orientation: [0.0, 0.0, 0.0],
            kind: ShapeKind::Box {
                half_extents: [0.25, 0.5, 0.125],
            },
        }],
        cubes: if visual {
            vec![Cube::new([-4.0, 0.0, -2.0], [8.0, 16.0, 4.0])]
        } else {
            Vec::new()
        },
        mass: None,
        friction: None,
        locators: BTreeMap::new(),
    }
}

fn hinge() -> HingeParams {
    HingeParams {
        pivot_a: [0.0, 1.0, 0.0],
        pivot_b: [0.0, -0.25, 0.0],
        axis_a: [1.0, 0.0, 0.0],
        axis_b: [1.0, 0.0, 0.0],
        max_force: None,
        collide_connected: false,
    }
}

fn script(prefab: &Prefab, default_mass: f64) -> String {
    emit_script(prefab, default_mass).unwrap()
}

fn ragdoll() -> Prefab {
    let mut chest = body("chest", [0.0, 1.0, 0.0], true);
    chest.friction = Some(0.3);
    Prefab {
        id: "ragdoll".to_string(),
        bodies: vec![chest, body("head", [0.0, 2.0, 0.0], true)],
        constraints: vec![Constraint {
            id: "neck".to_string(),
            body_a: "chest".to_string(),
            body_b: "head".to_string(),
            kind: ConstraintKind::Lock { max_force: None },
        }],
    }
}

#[test]
fn registers_the_prefab_constructor() {
    let js = script(&ragdoll(), DEFAULT_MASS);

    assert!(js.starts_with("import * as CANNON from \"cannon-es\";\n"));
    assert!(js.contains("Physics.registerPrefab(\"ragdoll\", ({ physWorld, pos, dim }) => {\n"));
    assert!(js.ends_with("  };\n});\n"));
}

#[test]
fn bodies_use_default_mass_and_friction_material() {
    let js = script(&ragdoll(), DEFAULT_MASS);

    assert!(js.contains("  const offPosbodychest = pos.vadd(new CANNON.Vec3(0, 1, 0));\n"));
    assert!(js.contains("    mass: 2,\n"));
    assert!(js.contains("    material: new CANNON.Material({ friction: 0.3 }),\n"));
    assert!(js.contains("    material: new CANNON.Material(),\n"));
    assert!(js.contains(
        "  bodychest.addShape(new CANNON.Box(new CANNON.Vec3(0.25, 0.5, 0.125)), \
         new CANNON.Vec3(0, 0.5, 0), new CANNON.Quaternion().setFromEuler(0, 0, 0));\n"
    ));
}

#[test]
fn explicit_mass_overrides_default() {
    let mut prefab = ragdoll();
    prefab.bodies[0].mass = Some(5.5);
    let js = script(&prefab, 7.0);

    assert!(js.contains("    mass: 5.5,\n"));
    assert!(js.contains("    mass: 7,\n"));
    assert!(!js.contains("    mass: 2,\n"));
}

#[test]
fn lock_without_max_force_gets_empty_options() {
    let js = script(&ragdoll(), DEFAULT_MASS);

    assert!(js.contains(
        "  const constraintneck = new CANNON.LockConstraint(bodychest, bodyhead, {});\n"
    ));
    assert!(js.contains("  physWorld.addConstraint(constraintneck);\n"));
}

#[test]
fn constraints_come_after_every_body() {
    let js = script(&ragdoll(), DEFAULT_MASS);

    let last_body = js.find("const bodyhead =").expect("head body");
    let constraint = js.find("const constraintneck =").expect("neck constraint");
    assert!(last_body < constraint);
}

#[test]
fn twist_angles_are_radians() {
    let mut prefab = ragdoll();
    prefab.constraints[0].kind = ConstraintKind::Twist {
        hinge: HingeParams {
            max_force: Some(100.0),
            ..hinge()
        },
        angle: 90.0,
        twist_angle: 180.0,
    };
    let js = script(&prefab, DEFAULT_MASS);

    assert!(js.contains("new CANNON.ConeTwistConstraint(bodychest, bodyhead, {"));
    assert!(js.contains(&format!("angle: {}", 90.0 * TO_RAD)));
    assert!(js.contains(&format!("twistAngle: {}", 180.0 * TO_RAD)));
    assert!(js.contains("collideConnected: false, maxForce: 100 }"));
}

#[test]
fn hinge_lists_pivots_and_axes() {
    let mut prefab = ragdoll();
    prefab.constraints[0].kind = ConstraintKind::Hinge(HingeParams {
        collide_connected: true,
        ..hinge()
    });
    let js = script(&prefab, DEFAULT_MASS);

    assert!(js.contains(
        "new CANNON.HingeConstraint(bodychest, bodyhead, { \
         pivotA: new CANNON.Vec3(0, 1, 0), pivotB: new CANNON.Vec3(0, -0.25, 0), \
         axisA: new CANNON.Vec3(1, 0, 0), axisB: new CANNON.Vec3(1, 0, 0), \
         collideConnected: true })"
    ));
}

#[test]
fn point_and_distance_pass_positional_arguments() {
    let mut prefab = ragdoll();
    prefab.constraints[0].kind = ConstraintKind::Point {
        pivot_a: [0.0, 1.0, 0.0],
        pivot_b: [0.0, 0.0, 0.0],
        max_force: None,
    };
    prefab.constraints.push(Constraint {
        id: "tether".to_string(),
        body_a: "chest".to_string(),
        body_b: "head".to_string(),
        kind: ConstraintKind::Distance {
            distance: 1.5,
            max_force: Some(20.0),
        },
    });
    let js = script(&prefab, DEFAULT_MASS);

    assert!(js.contains(
        "new CANNON.PointToPointConstraint(bodychest, new CANNON.Vec3(0, 1, 0), \
         bodyhead, new CANNON.Vec3(0, 0, 0), undefined)"
    ));
    assert!(js.contains("new CANNON.DistanceConstraint(bodychest, bodyhead, 1.5, 20)"));
}

#[test]
fn visual_bodies_get_entities_and_cubeless_bodies_join_the_world() {
    let mut prefab = ragdoll();
    prefab.bodies.push(body("anchor", [0.0, 0.0, 0.0], false));
    let js = script(&prefab, DEFAULT_MASS);

    assert!(js.contains(
        "  Physics.createBodyEntity(\"physics:ragdoll.chest\", offPosbodychest, dim, bodychest);\n"
    ));
    assert!(js.contains("  physWorld.addBody(bodyanchor);\n"));
    assert!(!js.contains("physics:ragdoll.anchor"));
}

#[test]
fn returns_objects_keyed_by_id() {
    let js = script(&ragdoll(), DEFAULT_MASS);

    assert!(js.contains(
        "  return {\n    \"bodychest\": bodychest,\n    \"bodyhead\": bodyhead,\n    \
         \"constraintneck\": constraintneck,\n  };\n"
    ));
}

#[test]
fn unusual_ids_get_safe_identifiers_but_exact_keys() {
    let mut prefab = ragdoll();
    prefab.bodies[1].id = "left-arm".to_string();
    prefab.constraints[0].body_b = "left-arm".to_string();
    let js = script(&prefab, DEFAULT_MASS);

    assert!(js.contains("const bodyleft_arm = new CANNON.Body({"));
    assert!(js.contains("    \"bodyleft-arm\": bodyleft_arm,\n"));
}

#[test]
fn colliding_identifiers_get_suffixes() {
    let mut prefab = ragdoll();
    prefab.bodies[0].id = "left-arm".to_string();
    prefab.bodies[1].id = "left_arm".to_string();
    prefab.constraints[0].body_a = "left-arm".to_string();
    prefab.constraints[0].body_b = "left_arm".to_string();
    let js = script(&prefab, DEFAULT_MASS);

    assert_eq!(js.matches("const bodyleft_arm = ").count(), 1);
    assert_eq!(js.matches("const bodyleft_arm_2 = ").count(), 1);
    assert!(js.contains("new CANNON.LockConstraint(bodyleft_arm, bodyleft_arm_2, {})"));
    assert!(js.contains("    \"bodyleft-arm\": bodyleft_arm,\n"));
    assert!(js.contains("    \"bodyleft_arm\": bodyleft_arm_2,\n"));
}

#[test]
fn duplicate_constraint_ids_stay_distinct() {
    let mut prefab = ragdoll();
    prefab.constraints.push(prefab.constraints[0].clone());
    let js = script(&prefab, DEFAULT_MASS);

    assert_eq!(js.matches("const constraintneck = ").count(), 1);
    assert!(js.contains("  physWorld.addConstraint(constraintneck_2);\n"));
}

#[test]
fn output_is_stable() {
    let prefab = ragdoll();
    assert_eq!(
        script(&prefab, DEFAULT_MASS),
        script(&prefab, DEFAULT_MASS)
    );
}
