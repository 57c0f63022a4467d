//! Cursor follower smoothing.

use glam::Vec2;

// Time for the follower to close ~95% of the gap.
pub const CURSOR_FOLLOW_SEC: f32 = 0.18;
pub const CURSOR_HOVER_SCALE: f32 = 2.2;

#[derive(Clone, Copy, Debug)]
pub struct CursorFollower {
    pub pos: Vec2,
    pub scale: f32,
    initialized: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorFollower {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
            initialized: false,
        }
    }

    /// Move toward `target`; jumps straight there on the first call.
    pub fn step(&mut self, target: Vec2, hovering: bool, dt_sec: f32) -> Vec2 {
        let scale_target = if hovering { CURSOR_HOVER_SCALE } else { 1.0 };
        if !self.initialized {
            self.pos = target;
            self.scale = scale_target;
            self.initialized = true;
            return self.pos;
        }
        let alpha = 1.0 - (-3.0 * dt_sec.max(0.0) / CURSOR_FOLLOW_SEC).exp();
        self.pos += (target - self.pos) * alpha;
        self.scale += (scale_target - self.scale) * alpha;
        self.pos
    }

    /// CSS transform placing a centered follower element.
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({:.1}px, {:.1}px, 0) translate(-50%, -50%) scale({:.3})",
            self.pos.x, self.pos.y, self.scale
        )
    }
}
