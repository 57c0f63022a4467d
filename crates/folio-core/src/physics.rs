//! Spring body behind the pointer "nudge" on the model.
//!
//! The body is an offset from the model's rest pose. A hit adds velocity, a
//! damped spring pulls the offset back. It only ever feeds the rendered model
//! matrix, never the timeline.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct NudgeBody {
    pub offset: Vec3,
    pub velocity: Vec3,
    stiffness: f32,
    damping_ratio: f32,
    max_offset: f32,
    rng: StdRng,
}

impl NudgeBody {
    pub fn new(seed: u64) -> Self {
        Self {
            offset: Vec3::ZERO,
            velocity: Vec3::ZERO,
            stiffness: NUDGE_STIFFNESS,
            damping_ratio: NUDGE_DAMPING_RATIO,
            max_offset: NUDGE_MAX_OFFSET,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn impulse(&mut self, direction: Vec3, strength: f32) {
        self.velocity += direction.normalize_or_zero() * strength;
    }

    /// Scatter the body to a fresh offset drawn from its seeded generator.
    pub fn reseed(&mut self) {
        let spread = NUDGE_RESEED_SPREAD;
        self.offset = Vec3::new(
            self.rng.gen_range(-spread..=spread),
            self.rng.gen_range(-spread..=spread),
            self.rng.gen_range(-spread..=spread),
        );
        self.velocity = Vec3::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        self.offset.length_squared() < 1e-8 && self.velocity.length_squared() < 1e-8
    }

    /// Semi-implicit Euler step of a damped spring toward zero offset.
    pub fn step(&mut self, dt_sec: f32) {
        let dt = dt_sec.clamp(0.0, 0.1);
        if dt == 0.0 {
            return;
        }
        let k = self.stiffness;
        let c = 2.0 * k.sqrt() * self.damping_ratio;
        let accel = -k * self.offset - c * self.velocity;
        self.velocity += accel * dt;
        self.offset += self.velocity * dt;
        let len = self.offset.length();
        if len > self.max_offset {
            self.offset *= self.max_offset / len;
        }
        if self.offset.length_squared() < 1e-10 && self.velocity.length_squared() < 1e-10 {
            self.offset = Vec3::ZERO;
            self.velocity = Vec3::ZERO;
        }
    }
}

/// Ray-sphere intersection; returns the distance along the ray if hit in front.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
