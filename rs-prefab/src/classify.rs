use rs_model::NormalizedBone;

pub const BODY_PARENT: &str = "Objects";
pub const CONSTRAINT_PARENT: &str = "Constraints";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneRole {
    Body,
    Constraint,
    Ignored,
}

/// Routes a bone by the name of its parent. Constraint bones carry all of their
/// options on locators, so one without any is ignored outright.
pub fn classify(bone: &NormalizedBone) -> BoneRole {
    match bone.parent.as_deref() {
        Some(BODY_PARENT) => BoneRole::Body,
        Some(CONSTRAINT_PARENT) if !bone.locators.is_empty() => BoneRole::Constraint,
        _ => BoneRole::Ignored,
    }
}
