//! Options encoded in locator names.
//!
//! Blockbench has no way to attach arbitrary data to a bone, but locator names are
//! free-form. A locator called `friction_0_5_` sets the `friction` option to
//! `0_5`, which decodes to `0.5`. The grammar of a value is:
//!
//! ```text
//! number := "_"? digits? ("_" digits?)? ("_" any)*
//! vector := number "__" number "__" number
//! ```
//!
//! A leading `_` is a minus sign, the next `_` is the decimal point and anything
//! after a second `_` is ignored. Trailing underscores on a name are dropped so
//! authors can keep two locators apart (`mass_2` and `mass_2_` look the same).

use std::collections::BTreeMap;

use rs_model::Locator;
use rs_utils::{Vec3, model_to_world};
use tracing::warn;

use crate::Body;

/// Drops trailing underscores, keeping the first character of an all-underscore name.
pub fn trim_locator(name: &str) -> &str {
    let trimmed = name.trim_end_matches('_');
    if trimmed.is_empty() {
        &name[..name.len().min(1)]
    } else {
        trimmed
    }
}

/// Raw value of the option `key`, taken from the first locator named `key_<value>`.
pub fn option<'a>(locators: &'a BTreeMap<String, Locator>, key: &str) -> Option<&'a str> {
    let prefix = format!("{key}_");
    let mut matches = locators
        .keys()
        .filter_map(|name| name.strip_prefix(prefix.as_str()));

    let first = matches.next()?;
    if let Some(ignored) = matches.next() {
        warn!(
            "option `{key}` is declared more than once; using `{first}`, ignoring `{ignored}`"
        );
    }
    let value = trim_locator(first);
    (!value.is_empty()).then_some(value)
}

pub fn decode_number(raw: &str) -> Option<f64> {
    let (negative, body) = match raw.strip_prefix('_') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let mut segments = body.split('_');
    let int = segments.next().unwrap_or_default();
    let frac = segments.next().unwrap_or_default();
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !is_digits(int) || !is_digits(frac) {
        return None;
    }

    let literal = format!(
        "{}.{}",
        if int.is_empty() { "0" } else { int },
        if frac.is_empty() { "0" } else { frac }
    );
    let value = literal.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

pub fn decode_vec3(raw: &str) -> Option<Vec3> {
    let parts = raw.split("__").collect::<Vec<_>>();
    let [x, y, z] = parts.as_slice() else {
        return None;
    };
    Some([decode_number(x)?, decode_number(y)?, decode_number(z)?])
}

/// Nonzero numbers are true; anything absent or undecodable is false.
pub fn decode_flag(raw: Option<&str>) -> bool {
    raw.and_then(decode_number).is_some_and(|v| v != 0.0)
}

/// Reads `raw` as a literal vector, or failing that as the name of one of `body`'s
/// locators, whose position is returned in world units.
pub fn resolve_relative(raw: &str, body: &Body) -> Option<Vec3> {
    if let Some(v) = decode_vec3(raw) {
        return Some(v);
    }
    body.locators
        .iter()
        .find(|(name, _)| trim_locator(name) == raw)
        .map(|(_, locator)| model_to_world(locator.position()))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
