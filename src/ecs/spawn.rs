//! Entity spawning. Bundles mirror the component sets the systems query
//! for; a missing component here means the entity silently drops out of
//! the matching system.

use glam::Vec2;

use crate::ecs::components::*;
use crate::ecs::systems::dogs;
use crate::lights::{self, SafeLight};

/// Cat footprint.
const CAT_SIZE: f32 = 30.0;
const CAT_MAX_HEALTH: f32 = 100.0;
const CAT_MAX_STAMINA: f32 = 100.0;

/// Player-dog footprint. Tougher and faster than the cat, but it cannot
/// win the level and never hides in safe zones.
const PLAYER_DOG_SIZE: f32 = 40.0;
const PLAYER_DOG_MAX_HEALTH: f32 = 150.0;

/// Wild-dog stats.
const WILD_DOG_SIZE: f32 = 25.0;
const WILD_DOG_TERRITORY_RADIUS: f32 = 300.0;
const WILD_DOG_DETECTION_RADIUS: f32 = 200.0;

/// Spawn the player cat. Collides with lamp posts, sprints on stamina,
/// sits down when idle long enough.
pub fn spawn_cat(world: &mut hecs::World, pos: Vec2) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Velocity(Vec2::ZERO),
        Facing::Right,
        Body { size: CAT_SIZE },
        MoveProfile::CAT,
        SpeedCurve::at_rest(MoveProfile::CAT.walk_speed),
        MoveTarget::default(),
        Health::full(CAT_MAX_HEALTH),
        Stamina::full(CAT_MAX_STAMINA),
        Rest::default(),
        LampBound,
    ))
}

/// Spawn the switchable player dog. No stamina gate, no lamp collision.
pub fn spawn_player_dog(world: &mut hecs::World, pos: Vec2) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Velocity(Vec2::ZERO),
        Facing::Right,
        Body {
            size: PLAYER_DOG_SIZE,
        },
        MoveProfile::PLAYER_DOG,
        SpeedCurve::at_rest(MoveProfile::PLAYER_DOG.walk_speed),
        MoveTarget::default(),
        Health::full(PLAYER_DOG_MAX_HEALTH),
    ))
}

/// Spawn one wild dog with its territory anchored at `home`.
pub fn spawn_wild_dog(world: &mut hecs::World, home: Vec2) -> hecs::Entity {
    world.spawn((
        Position(home),
        Velocity(Vec2::ZERO),
        Facing::Left,
        Body {
            size: WILD_DOG_SIZE,
        },
        DogBrain::new(dogs::MIN_CHASE_SPEED),
        Territory {
            home,
            radius: WILD_DOG_TERRITORY_RADIUS,
            detection: WILD_DOG_DETECTION_RADIUS,
        },
    ))
}

/// Spawn a pack of wild dogs at uniform positions inside `[margin,
/// extent - margin]²`, resampling any position that lands in a safe zone.
pub fn spawn_wild_dogs(
    world: &mut hecs::World,
    count: usize,
    safe_lights: &[SafeLight],
    margin: f32,
    extent: f32,
    rng: &mut fastrand::Rng,
) -> Vec<hecs::Entity> {
    let mut dogs = Vec::with_capacity(count);
    while dogs.len() < count {
        let span = extent - margin * 2.0;
        let home = Vec2::new(margin + rng.f32() * span, margin + rng.f32() * span);
        if lights::any_contains(safe_lights, home) {
            continue; // resample: dogs never wake up under a lamp
        }
        dogs.push(spawn_wild_dog(world, home));
    }
    dogs
}
