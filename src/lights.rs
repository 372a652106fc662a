//! Safe streetlights. Each light projects a circular safe zone the wild
//! dogs refuse to hunt inside, plus a small solid collision circle around
//! the lamp post itself (see `ecs::systems::collision`).

use glam::Vec2;

use crate::consts::WORLD_EXTENT;
use crate::util::geom;

/// Default safe-zone radius.
const LIGHT_RADIUS: f32 = 170.0;
/// Fraction of the radius rendered as the bright core. Presentation only.
const INNER_RADIUS_FRACTION: f32 = 0.3;
/// Lights spawn at least this far from the world edge.
const SPAWN_MARGIN: f32 = 200.0;
/// Flicker period in ticks (~200 ms).
const FLICKER_PERIOD_TICKS: f32 = 12.0;

/// A stationary lamp with a circular safe zone.
#[derive(Debug, Clone, Copy)]
pub struct SafeLight {
    pos: Vec2,
    radius: f32,
    flicker_offset: f32,
}

impl SafeLight {
    pub fn new(pos: Vec2, flicker_offset: f32) -> Self {
        Self {
            pos,
            radius: LIGHT_RADIUS,
            flicker_offset,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Safe-zone radius. Immutable after construction.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Bright-core radius. Presentation only, no gameplay meaning.
    pub fn inner_radius(&self) -> f32 {
        self.radius * INNER_RADIUS_FRACTION
    }

    /// Strict containment test: dogs treat a point inside as off-limits.
    pub fn contains(&self, point: Vec2) -> bool {
        geom::within(point, self.pos, self.radius)
    }

    /// Flicker brightness in `[0.8, 1.0]`, derived from the session tick
    /// clock. Presentation only.
    pub fn brightness(&self, ticks: u64) -> f32 {
        0.9 + (ticks as f32 / FLICKER_PERIOD_TICKS + self.flicker_offset).sin() * 0.1
    }
}

/// World-level safe-zone query: inside any one light counts as safe.
pub fn any_contains(lights: &[SafeLight], point: Vec2) -> bool {
    lights.iter().any(|light| light.contains(point))
}

/// Scatter `count` lights uniformly across the world interior.
pub fn scatter(rng: &mut fastrand::Rng, count: usize) -> Vec<SafeLight> {
    (0..count)
        .map(|_| {
            let span = WORLD_EXTENT - SPAWN_MARGIN * 2.0;
            let pos = Vec2::new(
                SPAWN_MARGIN + rng.f32() * span,
                SPAWN_MARGIN + rng.f32() * span,
            );
            SafeLight::new(pos, rng.f32() * std::f32::consts::TAU)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_matches_distance() {
        let light = SafeLight::new(Vec2::new(500.0, 500.0), 0.0);
        assert!(light.contains(Vec2::new(500.0, 500.0)));
        assert!(light.contains(Vec2::new(500.0 + 169.9, 500.0)));
        assert!(!light.contains(Vec2::new(500.0 + 170.0, 500.0)));
        // Symmetric in every direction.
        assert!(light.contains(Vec2::new(500.0, 500.0 - 169.9)));
        assert!(!light.contains(Vec2::new(500.0 - 170.0, 500.0)));
    }

    #[test]
    fn any_contains_is_per_light_or() {
        let lights = vec![
            SafeLight::new(Vec2::new(300.0, 300.0), 0.0),
            SafeLight::new(Vec2::new(2000.0, 2000.0), 1.0),
        ];
        assert!(any_contains(&lights, Vec2::new(2100.0, 2000.0)));
        assert!(!any_contains(&lights, Vec2::new(1000.0, 1000.0)));
    }

    #[test]
    fn brightness_stays_in_band() {
        let light = SafeLight::new(Vec2::ZERO, 1.3);
        for tick in 0..600 {
            let b = light.brightness(tick);
            assert!((0.79..=1.01).contains(&b), "brightness {b} out of band");
        }
    }

    #[test]
    fn scatter_respects_margin() {
        let mut rng = fastrand::Rng::with_seed(7);
        for light in scatter(&mut rng, 64) {
            assert!(light.pos().x >= SPAWN_MARGIN);
            assert!(light.pos().x <= WORLD_EXTENT - SPAWN_MARGIN);
            assert!(light.pos().y >= SPAWN_MARGIN);
            assert!(light.pos().y <= WORLD_EXTENT - SPAWN_MARGIN);
        }
    }
}
