//! Instantiation scripts for the `cannon-es` runtime.
//!
//! Each script registers a constructor with `Physics.registerPrefab`. When the
//! runtime spawns the prefab, the constructor builds every body at
//! `pos + offset`, links them with constraints and returns the objects keyed as
//! `body<id>` / `constraint<id>`.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use rs_prefab::{Body, Constraint, ConstraintKind, HingeParams, Prefab, Shape, ShapeKind};
use rs_utils::{TO_RAD, Vec3, js_identifier};

use crate::EmitError;

/// Mass used when a body has no `mass` option.
pub const DEFAULT_MASS: f64 = 2.0;

const HEADER: &str = r#"import * as CANNON from "cannon-es";
import Physics from "../physics";
import { CollisionGroup } from "../consts";
"#;

pub fn emit_script(prefab: &Prefab, default_mass: f64) -> Result<String, EmitError> {
    let mut out = String::from(HEADER);
    write_script(&mut out, prefab, default_mass)?;
    Ok(out)
}

fn write_script(out: &mut String, prefab: &Prefab, default_mass: f64) -> fmt::Result {
    let idents = Idents::new(prefab);

    writeln!(out)?;
    writeln!(
        out,
        "Physics.registerPrefab({}, ({{ physWorld, pos, dim }}) => {{",
        js_string(&prefab.id)
    )?;

    for body in &prefab.bodies {
        write_body(out, idents.body(&body.id), body, default_mass)?;
    }
    for (constraint, ident) in prefab.constraints.iter().zip(&idents.constraints) {
        write_constraint(out, &idents, ident, constraint)?;
    }
    for body in &prefab.bodies {
        let ident = idents.body(&body.id);
        if body.is_visual() {
            let entity = format!("physics:{}.{}", prefab.id, body.id);
            writeln!(
                out,
                "  Physics.createBodyEntity({}, offPos{ident}, dim, {ident});",
                js_string(&entity)
            )?;
        } else {
            writeln!(out, "  physWorld.addBody({ident});")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "  return {{")?;
    for body in &prefab.bodies {
        let key = js_string(&format!("body{}", body.id));
        writeln!(out, "    {key}: {},", idents.body(&body.id))?;
    }
    for (constraint, ident) in prefab.constraints.iter().zip(&idents.constraints) {
        let key = js_string(&format!("constraint{}", constraint.id));
        writeln!(out, "    {key}: {ident},")?;
    }
    writeln!(out, "  }};")?;
    writeln!(out, "}});")
}

/// Variable names for one script. Sanitizing can map distinct ids onto the
/// same name, so later ids get a numeric suffix until the name is free.
struct Idents<'a> {
    bodies: HashMap<&'a str, String>,
    /// In constraint order.
    constraints: Vec<String>,
}

impl<'a> Idents<'a> {
    fn new(prefab: &'a Prefab) -> Self {
        let mut taken = HashSet::new();
        let bodies = prefab
            .bodies
            .iter()
            .map(|b| (b.id.as_str(), unique_ident("body", &b.id, &mut taken)))
            .collect();
        let constraints = prefab
            .constraints
            .iter()
            .map(|c| unique_ident("constraint", &c.id, &mut taken))
            .collect();
        Self {
            bodies,
            constraints,
        }
    }

    fn body(&self, id: &str) -> &str {
        self.bodies.get(id).map(String::as_str).unwrap_or_default()
    }
}

fn unique_ident(prefix: &str, id: &str, taken: &mut HashSet<String>) -> String {
    let base = format!("{prefix}{}", js_identifier(id));
    let mut ident = base.clone();
    let mut n = 2;
    while !taken.insert(ident.clone()) {
        ident = format!("{base}_{n}");
        n += 1;
    }
    ident
}

fn write_body(out: &mut String, ident: &str, body: &Body, default_mass: f64) -> fmt::Result {
    let material = match body.friction {
        Some(friction) => format!("new CANNON.Material({{ friction: {} }})", js_num(friction)),
        None => "new CANNON.Material()".to_string(),
    };

    writeln!(out, "  const offPos{ident} = pos.vadd({});", js_vec3(body.offset))?;
    writeln!(out, "  const {ident} = new CANNON.Body({{")?;
    writeln!(out, "    mass: {},", js_num(body.mass.unwrap_or(default_mass)))?;
    writeln!(out, "    position: offPos{ident},")?;
    writeln!(out, "    material: {material},")?;
    writeln!(out, "    collisionFilterGroup: CollisionGroup.Object,")?;
    writeln!(
        out,
        "    collisionFilterMask: CollisionGroup.World | CollisionGroup.Object | CollisionGroup.Player,"
    )?;
    writeln!(out, "  }});")?;
    for shape in &body.shapes {
        writeln!(out, "  {ident}.addShape({});", shape_args(shape))?;
    }
    writeln!(out)
}

fn shape_args(shape: &Shape) -> String {
    let geometry = match &shape.kind {
        ShapeKind::Box { half_extents } => format!("new CANNON.Box({})", js_vec3(*half_extents)),
    };
    let [x, y, z] = shape.orientation;
    format!(
        "{geometry}, {}, new CANNON.Quaternion().setFromEuler({}, {}, {})",
        js_vec3(shape.offset),
        js_num(x),
        js_num(y),
        js_num(z)
    )
}

fn write_constraint(
    out: &mut String,
    idents: &Idents,
    ident: &str,
    constraint: &Constraint,
) -> fmt::Result {
    let a = idents.body(&constraint.body_a);
    let b = idents.body(&constraint.body_b);

    let expr = match &constraint.kind {
        ConstraintKind::Distance {
            distance,
            max_force,
        } => format!(
            "new CANNON.DistanceConstraint({a}, {b}, {}, {})",
            js_num(*distance),
            js_opt(*max_force)
        ),
        ConstraintKind::Lock { max_force } => {
            let opts = max_force
                .map(|f| format!("maxForce: {}", js_num(f)))
                .into_iter()
                .collect::<Vec<_>>();
            format!("new CANNON.LockConstraint({a}, {b}, {})", js_object(&opts))
        }
        ConstraintKind::Hinge(hinge) => format!(
            "new CANNON.HingeConstraint({a}, {b}, {})",
            js_object(&hinge_options(hinge, &[]))
        ),
        ConstraintKind::Twist {
            hinge,
            angle,
            twist_angle,
        } => {
            let extra = [
                format!("angle: {}", js_num(angle * TO_RAD)),
                format!("twistAngle: {}", js_num(twist_angle * TO_RAD)),
            ];
            format!(
                "new CANNON.ConeTwistConstraint({a}, {b}, {})",
                js_object(&hinge_options(hinge, &extra))
            )
        }
        ConstraintKind::Point {
            pivot_a,
            pivot_b,
            max_force,
        } => format!(
            "new CANNON.PointToPointConstraint({a}, {}, {b}, {}, {})",
            js_vec3(*pivot_a),
            js_vec3(*pivot_b),
            js_opt(*max_force)
        ),
    };

    writeln!(out, "  const {ident} = {expr};")?;
    writeln!(out, "  physWorld.addConstraint({ident});")?;
    writeln!(out)
}

fn hinge_options(hinge: &HingeParams, extra: &[String]) -> Vec<String> {
    let mut opts = vec![
        format!("pivotA: {}", js_vec3(hinge.pivot_a)),
        format!("pivotB: {}", js_vec3(hinge.pivot_b)),
        format!("axisA: {}", js_vec3(hinge.axis_a)),
        format!("axisB: {}", js_vec3(hinge.axis_b)),
    ];
    opts.extend(extra.iter().cloned());
    opts.push(format!("collideConnected: {}", hinge.collide_connected));
    if let Some(max_force) = hinge.max_force {
        opts.push(format!("maxForce: {}", js_num(max_force)));
    }
    opts
}

fn js_object(entries: &[String]) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    format!("{{ {} }}", entries.join(", "))
}

fn js_num(v: f64) -> String {
    format!("{v}")
}

fn js_opt(v: Option<f64>) -> String {
    v.map(js_num).unwrap_or_else(|| "undefined".to_string())
}

fn js_vec3(v: Vec3) -> String {
    format!(
        "new CANNON.Vec3({}, {}, {})",
        js_num(v[0]),
        js_num(v[1]),
        js_num(v[2])
    )
}

/// A JSON string literal is also a valid JavaScript one.
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests;
