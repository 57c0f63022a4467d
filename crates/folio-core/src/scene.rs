//! Explicit scene context and the site's scroll timeline.

use crate::constants::*;
use crate::scroll::{PageLayout, ScrollError, ScrollRange};
use crate::state::{AmbientLight, Camera, DirectionalLight};
use crate::target::{
    PostParams, Target, TargetId, Targets, Transform, PARAM_BLOOM_STRENGTH,
    PARAM_BLOOM_THRESHOLD, PARAM_EXPOSURE,
};
use crate::timeline::{Timeline, TimelineError};
use crate::trigger::{Direction, Trigger};
use glam::Vec3;

pub const MODEL_TARGET: &str = "model";
pub const POST_TARGET: &str = "post";
pub const RESEED_TRIGGER: &str = "reseed-nudge";

// GSAP's default ease for `gsap.to`.
const DEFAULT_EASE: &str = "power1.out";

/// Everything the player and renderer share, constructed once at startup.
#[derive(Clone, Debug)]
pub struct SceneContext {
    pub camera: Camera,
    pub ambient: AmbientLight,
    pub key_light: DirectionalLight,
    pub targets: Targets,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneContext {
    /// Scene with camera, lights and post parameters. The model target is
    /// absent until [`SceneContext::install_model`] runs.
    pub fn new() -> Self {
        let mut targets = Targets::new();
        targets.insert(POST_TARGET, Target::Post(default_post_params()));
        Self {
            camera: Camera::default(),
            ambient: AmbientLight::default(),
            key_light: DirectionalLight::default(),
            targets,
        }
    }

    pub fn model_id() -> TargetId {
        TargetId::from(MODEL_TARGET)
    }

    pub fn post_id() -> TargetId {
        TargetId::from(POST_TARGET)
    }

    pub fn install_model(&mut self) {
        self.targets
            .insert(MODEL_TARGET, Target::Transform(initial_model_transform()));
    }

    pub fn model(&self) -> Option<&Transform> {
        self.targets.transform(&Self::model_id())
    }

    pub fn model_mut(&mut self) -> Option<&mut Transform> {
        self.targets.transform_mut(&Self::model_id())
    }

    pub fn bloom_strength(&self) -> f32 {
        self.post_value(PARAM_BLOOM_STRENGTH, BLOOM_STRENGTH)
    }

    pub fn bloom_threshold(&self) -> f32 {
        self.post_value(PARAM_BLOOM_THRESHOLD, BLOOM_THRESHOLD)
    }

    pub fn exposure(&self) -> f32 {
        self.post_value(PARAM_EXPOSURE, EXPOSURE)
    }

    fn post_value(&self, name: &str, fallback: f32) -> f32 {
        self.targets
            .post(&Self::post_id())
            .map(|p| p.value_or(name, fallback))
            .unwrap_or(fallback)
    }
}

pub fn default_post_params() -> PostParams {
    PostParams::new()
        .with(PARAM_BLOOM_STRENGTH, BLOOM_STRENGTH)
        .with(PARAM_BLOOM_THRESHOLD, BLOOM_THRESHOLD)
        .with(PARAM_EXPOSURE, EXPOSURE)
}

pub fn initial_model_transform() -> Transform {
    Transform {
        position: MODEL_POSITION,
        rotation: Vec3::new(0.0, MODEL_ROTATION_Y, 0.0),
        scale: MODEL_SCALE,
    }
}

/// Idle bob written over `position.y` every frame.
#[inline]
pub fn idle_float_y(base_y: f32, time_ms: f64) -> f32 {
    base_y + ((time_ms * IDLE_FLOAT_RATE_PER_MS).sin() as f32) * IDLE_FLOAT_AMPLITUDE
}

/// Progress intervals of the two scroll scenes for the given page layout.
pub fn scene_ranges(layout: &PageLayout) -> Result<((f32, f32), (f32, f32)), ScrollError> {
    let turn = ScrollRange::parse("top bottom", "top center")?.to_progress(layout);
    let slide = ScrollRange::parse("top center", "bottom center")?.to_progress(layout);
    Ok((turn, slide))
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Scroll(#[from] ScrollError),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

/// The site's timeline against the side-content section:
/// the model turns a full revolution while the section enters the lower half
/// of the viewport, then slides right and back while the section scrolls
/// through the centre line. `on_slide` fires whenever progress crosses the
/// start of the slide, in either direction.
pub fn portfolio_timeline(
    layout: &PageLayout,
    on_slide: impl FnMut() + 'static,
) -> Result<Timeline, SceneError> {
    let (turn, slide) = scene_ranges(layout)?;
    log::info!(
        "[scroll] turn {:.3}..{:.3} slide {:.3}..{:.3}",
        turn.0,
        turn.1,
        slide.0,
        slide.1
    );
    let timeline = Timeline::new()
        .tween(
            MODEL_TARGET,
            "rotation.y",
            Some(MODEL_ROTATION_Y),
            std::f32::consts::TAU,
            turn,
            DEFAULT_EASE,
        )?
        .tween(MODEL_TARGET, "position.x", Some(MODEL_POSITION.x), 2.0, slide, DEFAULT_EASE)?
        .tween(MODEL_TARGET, "position.z", Some(MODEL_POSITION.z), -2.0, slide, DEFAULT_EASE)?
        .tween(
            POST_TARGET,
            PARAM_BLOOM_STRENGTH,
            Some(BLOOM_STRENGTH),
            BLOOM_STRENGTH_PEAK,
            slide,
            "sine.inOut",
        )?
        .trigger(Trigger::new(RESEED_TRIGGER, slide.0, Direction::Both, on_slide));
    Ok(timeline)
}
