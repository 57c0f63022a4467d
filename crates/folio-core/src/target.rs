//! Animatable targets: named groups of numeric fields the timeline writes to.

use fnv::FnvHashMap;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// One numeric field of a target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    /// Uniform scale.
    Scale,
    /// Named scalar, e.g. a post-processing parameter.
    Param(String),
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        match s.trim() {
            "position.x" | "x" => Field::PositionX,
            "position.y" | "y" => Field::PositionY,
            "position.z" | "z" => Field::PositionZ,
            "rotation.x" => Field::RotationX,
            "rotation.y" => Field::RotationY,
            "rotation.z" => Field::RotationZ,
            "scale" => Field::Scale,
            other => Field::Param(other.to_string()),
        }
    }
}

impl FromStr for Field {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Field::from(s))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::PositionX => f.write_str("position.x"),
            Field::PositionY => f.write_str("position.y"),
            Field::PositionZ => f.write_str("position.z"),
            Field::RotationX => f.write_str("rotation.x"),
            Field::RotationY => f.write_str("rotation.y"),
            Field::RotationZ => f.write_str("rotation.z"),
            Field::Scale => f.write_str("scale"),
            Field::Param(name) => f.write_str(name),
        }
    }
}

/// Something the timeline can read and write fields on.
pub trait Animatable {
    /// Current value of `field`, or `None` if the target does not expose it.
    fn get(&self, field: &Field) -> Option<f32>;
    /// Write `value` into `field`. Returns `false` if the field is not exposed.
    fn set(&mut self, field: &Field, value: f32) -> bool;
}

/// Position, Euler rotation (radians, XYZ order) and uniform scale of a 3D object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> glam::Mat4 {
        let rot = glam::Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        glam::Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rot, self.position)
    }
}

impl Animatable for Transform {
    fn get(&self, field: &Field) -> Option<f32> {
        match field {
            Field::PositionX => Some(self.position.x),
            Field::PositionY => Some(self.position.y),
            Field::PositionZ => Some(self.position.z),
            Field::RotationX => Some(self.rotation.x),
            Field::RotationY => Some(self.rotation.y),
            Field::RotationZ => Some(self.rotation.z),
            Field::Scale => Some(self.scale),
            Field::Param(_) => None,
        }
    }

    fn set(&mut self, field: &Field, value: f32) -> bool {
        let slot = match field {
            Field::PositionX => &mut self.position.x,
            Field::PositionY => &mut self.position.y,
            Field::PositionZ => &mut self.position.z,
            Field::RotationX => &mut self.rotation.x,
            Field::RotationY => &mut self.rotation.y,
            Field::RotationZ => &mut self.rotation.z,
            Field::Scale => &mut self.scale,
            Field::Param(_) => return false,
        };
        *slot = value;
        true
    }
}

/// Named scalar parameters of the post-processing chain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostParams {
    values: FnvHashMap<String, f32>,
}

pub const PARAM_BLOOM_STRENGTH: &str = "bloom_strength";
pub const PARAM_BLOOM_THRESHOLD: &str = "bloom_threshold";
pub const PARAM_EXPOSURE: &str = "exposure";

impl PostParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f32) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn value_or(&self, name: &str, fallback: f32) -> f32 {
        self.value(name).unwrap_or(fallback)
    }
}

impl Animatable for PostParams {
    fn get(&self, field: &Field) -> Option<f32> {
        match field {
            Field::Param(name) => self.value(name),
            _ => None,
        }
    }

    // Only parameters declared up front are writable.
    fn set(&mut self, field: &Field, value: f32) -> bool {
        match field {
            Field::Param(name) => match self.values.get_mut(name) {
                Some(v) => {
                    *v = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Stable name of a target as held by segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A target slot's contents.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Transform(Transform),
    Post(PostParams),
}

impl Animatable for Target {
    fn get(&self, field: &Field) -> Option<f32> {
        match self {
            Target::Transform(t) => t.get(field),
            Target::Post(p) => p.get(field),
        }
    }

    fn set(&mut self, field: &Field, value: f32) -> bool {
        match self {
            Target::Transform(t) => t.set(field, value),
            Target::Post(p) => p.set(field, value),
        }
    }
}

/// Registry of the targets that currently exist. A target that is still
/// loading simply has no entry.
#[derive(Clone, Debug, Default)]
pub struct Targets {
    slots: FnvHashMap<TargetId, Target>,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<TargetId>, target: Target) -> Option<Target> {
        self.slots.insert(id.into(), target)
    }

    pub fn remove(&mut self, id: &TargetId) -> Option<Target> {
        self.slots.remove(id)
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        self.slots.contains_key(id)
    }

    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.slots.get(id)
    }

    pub fn get_mut(&mut self, id: &TargetId) -> Option<&mut Target> {
        self.slots.get_mut(id)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn transform(&self, id: &TargetId) -> Option<&Transform> {
        match self.slots.get(id) {
            Some(Target::Transform(t)) => Some(t),
            _ => None,
        }
    }

    pub fn transform_mut(&mut self, id: &TargetId) -> Option<&mut Transform> {
        match self.slots.get_mut(id) {
            Some(Target::Transform(t)) => Some(t),
            _ => None,
        }
    }

    pub fn post(&self, id: &TargetId) -> Option<&PostParams> {
        match self.slots.get(id) {
            Some(Target::Post(p)) => Some(p),
            _ => None,
        }
    }
}
