use std::collections::BTreeMap;

use rs_model::{Locator, NormalizedBone};
use rs_utils::Vec3;
use thiserror::Error;
use tracing::debug;

use crate::locator::{decode_flag, decode_number, decode_vec3, option, resolve_relative};
use crate::{Body, Constraint, ConstraintKind, HingeParams};

#[derive(Debug, Clone, Copy)]
enum ConstraintType {
    Distance,
    Lock,
    Hinge,
    Twist,
    Point,
}

impl ConstraintType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "distance" => Some(Self::Distance),
            "lock" => Some(Self::Lock),
            "hinge" => Some(Self::Hinge),
            "twist" => Some(Self::Twist),
            "point" => Some(Self::Point),
            _ => None,
        }
    }
}

/// Why a declared constraint was dropped. None of these stop the rest of the
/// prefab from compiling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("body{which} `{id}` is not a body of this prefab")]
    UnknownBody { which: char, id: String },

    #[error("constraint links body `{0}` to itself")]
    SelfReference(String),

    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("option `{key}` has undecodable value `{raw}`")]
    InvalidOption { key: &'static str, raw: String },
}

/// Builds the constraint declared by a bone under `Constraints`.
///
/// `Ok(None)` means the bone does not declare a usable constraint at all: one of
/// `type`, `bodya`, `bodyb` is missing or the type is unknown. `bodies` must hold
/// every body of the geometry so references can point forward in bone order.
pub fn build_constraint(
    bone: &NormalizedBone,
    bodies: &[Body],
) -> Result<Option<Constraint>, ConstraintError> {
    let locators = &bone.locators;
    let (Some(ty), Some(body_a), Some(body_b)) = (
        option(locators, "type"),
        option(locators, "bodya"),
        option(locators, "bodyb"),
    ) else {
        debug!("bone `{}` does not declare type/bodya/bodyb, ignoring", bone.name);
        return Ok(None);
    };
    let Some(ty) = ConstraintType::parse(ty) else {
        debug!("bone `{}` has unknown constraint type `{ty}`, ignoring", bone.name);
        return Ok(None);
    };

    let a = find_body(bodies, body_a, 'A')?;
    let b = find_body(bodies, body_b, 'B')?;
    if a.id == b.id {
        return Err(ConstraintError::SelfReference(a.id.clone()));
    }

    let max_force = optional_number(locators, "maxforce")?;
    let kind = match ty {
        ConstraintType::Distance => ConstraintKind::Distance {
            distance: required_number(locators, "distance")?,
            max_force,
        },
        ConstraintType::Lock => ConstraintKind::Lock { max_force },
        ConstraintType::Hinge => ConstraintKind::Hinge(hinge_params(locators, a, b, max_force)?),
        ConstraintType::Twist => ConstraintKind::Twist {
            hinge: hinge_params(locators, a, b, max_force)?,
            angle: required_number(locators, "angle")?,
            twist_angle: required_number(locators, "twistangle")?,
        },
        ConstraintType::Point => ConstraintKind::Point {
            pivot_a: required_relative(locators, "pivota", a)?,
            pivot_b: required_relative(locators, "pivotb", b)?,
            max_force,
        },
    };

    Ok(Some(Constraint {
        id: bone.name.clone(),
        body_a: a.id.clone(),
        body_b: b.id.clone(),
        kind,
    }))
}

fn find_body<'a>(bodies: &'a [Body], id: &str, which: char) -> Result<&'a Body, ConstraintError> {
    bodies
        .iter()
        .find(|body| body.id == id)
        .ok_or_else(|| ConstraintError::UnknownBody {
            which,
            id: id.to_string(),
        })
}

fn hinge_params(
    locators: &BTreeMap<String, Locator>,
    a: &Body,
    b: &Body,
    max_force: Option<f64>,
) -> Result<HingeParams, ConstraintError> {
    Ok(HingeParams {
        pivot_a: required_relative(locators, "pivota", a)?,
        pivot_b: required_relative(locators, "pivotb", b)?,
        axis_a: required_vec3(locators, "axisa")?,
        axis_b: required_vec3(locators, "axisb")?,
        max_force,
        collide_connected: decode_flag(option(locators, "collideconnected")),
    })
}

fn required<'a>(
    locators: &'a BTreeMap<String, Locator>,
    key: &'static str,
) -> Result<&'a str, ConstraintError> {
    option(locators, key).ok_or(ConstraintError::MissingOption(key))
}

fn invalid(key: &'static str, raw: &str) -> ConstraintError {
    ConstraintError::InvalidOption {
        key,
        raw: raw.to_string(),
    }
}

fn required_number(
    locators: &BTreeMap<String, Locator>,
    key: &'static str,
) -> Result<f64, ConstraintError> {
    let raw = required(locators, key)?;
    decode_number(raw).ok_or_else(|| invalid(key, raw))
}

fn optional_number(
    locators: &BTreeMap<String, Locator>,
    key: &'static str,
) -> Result<Option<f64>, ConstraintError> {
    match option(locators, key) {
        Some(raw) => decode_number(raw).map(Some).ok_or_else(|| invalid(key, raw)),
        None => Ok(None),
    }
}

fn required_vec3(
    locators: &BTreeMap<String, Locator>,
    key: &'static str,
) -> Result<Vec3, ConstraintError> {
    let raw = required(locators, key)?;
    decode_vec3(raw).ok_or_else(|| invalid(key, raw))
}

fn required_relative(
    locators: &BTreeMap<String, Locator>,
    key: &'static str,
    body: &Body,
) -> Result<Vec3, ConstraintError> {
    let raw = required(locators, key)?;
    resolve_relative(raw, body).ok_or_else(|| invalid(key, raw))
}
