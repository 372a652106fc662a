//! Level selection and decorative scenery. Levels change only what the
//! renderer draws under the entities; simulation behavior is identical
//! across all of them.

use glam::Vec2;

use crate::consts::WORLD_EXTENT;

/// Number of decorative obstacles scattered per session.
const OBSTACLE_COUNT: usize = 30;
/// Obstacle size range.
const OBSTACLE_MIN_SIZE: f32 = 20.0;
const OBSTACLE_MAX_SIZE: f32 = 50.0;

/// Selectable level. Carried through the session so the renderer can pick
/// a ground tileset; never consulted by any system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelId {
    Streets,
    Park,
    CityBlock,
    MixedTerrain,
    Ruins,
}

impl LevelId {
    /// Menu numbering, 1-based.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Streets),
            2 => Some(Self::Park),
            3 => Some(Self::CityBlock),
            4 => Some(Self::MixedTerrain),
            5 => Some(Self::Ruins),
            _ => None,
        }
    }

    pub fn ground_theme(self) -> GroundTheme {
        match self {
            Self::Streets => GroundTheme::Checkerboard,
            Self::Park => GroundTheme::GrassAndFlagstone,
            Self::CityBlock => GroundTheme::AsphaltAndPavement,
            Self::MixedTerrain => GroundTheme::PatchworkTerrain,
            Self::Ruins => GroundTheme::CrackedStone,
        }
    }
}

impl Default for LevelId {
    fn default() -> Self {
        Self::Streets
    }
}

/// Ground tileset hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTheme {
    Checkerboard,
    GrassAndFlagstone,
    AsphaltAndPavement,
    PatchworkTerrain,
    CrackedStone,
}

/// Purely decorative scenery; entities walk straight through it.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Rock,
    Tree,
}

/// Scatter decorative rocks and trees across the whole world.
pub fn scatter_obstacles(rng: &mut fastrand::Rng) -> Vec<Obstacle> {
    (0..OBSTACLE_COUNT)
        .map(|_| Obstacle {
            pos: Vec2::new(rng.f32() * WORLD_EXTENT, rng.f32() * WORLD_EXTENT),
            size: OBSTACLE_MIN_SIZE + rng.f32() * (OBSTACLE_MAX_SIZE - OBSTACLE_MIN_SIZE),
            kind: if rng.f32() > 0.5 {
                ObstacleKind::Rock
            } else {
                ObstacleKind::Tree
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_numbers_round_trip() {
        assert_eq!(LevelId::from_number(1), Some(LevelId::Streets));
        assert_eq!(LevelId::from_number(5), Some(LevelId::Ruins));
        assert_eq!(LevelId::from_number(0), None);
        assert_eq!(LevelId::from_number(6), None);
    }

    #[test]
    fn obstacles_have_sane_sizes() {
        let mut rng = fastrand::Rng::with_seed(3);
        let obstacles = scatter_obstacles(&mut rng);
        assert_eq!(obstacles.len(), OBSTACLE_COUNT);
        for o in obstacles {
            assert!(o.size >= OBSTACLE_MIN_SIZE && o.size <= OBSTACLE_MAX_SIZE);
        }
    }
}
