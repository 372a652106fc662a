//! The single exit. Reaching it wins the session.

use glam::Vec2;

use crate::consts::WORLD_EXTENT;
use crate::util::geom;

/// Radius within which the cat counts as having reached the exit.
const REACH_RADIUS: f32 = 60.0;
/// Distance from the world boundary at which the exit spawns.
const EDGE_INSET: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct Exit {
    pos: Vec2,
}

impl Exit {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    /// Place the exit somewhere on a random world edge.
    pub fn random_edge(rng: &mut fastrand::Rng) -> Self {
        let along = rng.f32() * WORLD_EXTENT;
        let pos = match rng.u32(0..4) {
            0 => Vec2::new(WORLD_EXTENT - EDGE_INSET, along),
            1 => Vec2::new(EDGE_INSET, along),
            2 => Vec2::new(along, WORLD_EXTENT - EDGE_INSET),
            _ => Vec2::new(along, EDGE_INSET),
        };
        Self { pos }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn reach_radius(&self) -> f32 {
        REACH_RADIUS
    }

    pub fn reached(&self, cat_pos: Vec2) -> bool {
        geom::within(cat_pos, self.pos, REACH_RADIUS)
    }
}
