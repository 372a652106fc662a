pub mod collision;
pub mod dogs;
pub mod mover;

use crate::ecs::components::Health;

/// Tick every invulnerability window down by one. Runs once per tick for
/// every health-bearing entity, before the dogs bite, regardless of which
/// entity holds the controls.
pub fn countdown_invulnerability(world: &mut hecs::World) {
    for (_, health) in world.query_mut::<&mut Health>() {
        health.countdown();
    }
}
