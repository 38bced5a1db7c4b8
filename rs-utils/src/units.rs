//! Shared vector type and model-space/world-space conversions.
//!
//! Bedrock models are authored in "model pixels": 16 of them make up one block,
//! which is one world unit for the physics runtime.

pub type Vec3 = [f64; 3];

pub const UNITS_PER_BLOCK: f64 = 16.0;
pub const PX: f64 = 1.0 / UNITS_PER_BLOCK;
pub const TO_RAD: f64 = std::f64::consts::PI / 180.0;

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

/// Converts a position or size from model pixels to world units.
pub fn model_to_world(v: Vec3) -> Vec3 {
    scale(v, PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_block_is_sixteen_pixels() {
        assert_eq!(model_to_world([16.0, 8.0, -32.0]), [1.0, 0.5, -2.0]);
        assert_eq!(scale([1.0, 2.0, 3.0], PX), [0.0625, 0.125, 0.1875]);
    }

    #[test]
    fn add_and_sub_cancel() {
        let a = [2.0, -1.5, 4.0];
        let b = [0.5, 0.5, 0.5];
        assert_eq!(sub(add(a, b), b), a);
    }
}
