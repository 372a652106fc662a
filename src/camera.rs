//! Smooth-follow camera. Read-only consumer of entity positions; the
//! renderer uses its rect to place the viewport over the world.

use glam::Vec2;

use crate::consts::WORLD_EXTENT;

/// Fraction of the remaining distance closed per tick.
const SMOOTHING: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pos: Vec2,
    target: Vec2,
    viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            viewport,
        }
    }

    /// Center the target on `focus`, clamped so the viewport never leaves
    /// the world.
    pub fn follow(&mut self, focus: Vec2) {
        let max = Vec2::splat(WORLD_EXTENT) - self.viewport;
        self.target = (focus - self.viewport * 0.5).clamp(Vec2::ZERO, max);
    }

    /// Ease toward the follow target.
    pub fn update(&mut self) {
        self.pos += (self.target - self.pos) * SMOOTHING;
    }

    /// Top-left corner of the viewport in world space.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
