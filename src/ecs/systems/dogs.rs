//! Wild-dog AI: an independent patrol/chase/return state machine per dog.
//! Runs after the controlled mover, so every dog sees the cat's position
//! from this same tick. Split into a read phase (cat facts), a write phase
//! over all dogs, and a bite-resolution phase, so the world is only
//! borrowed one way at a time.

use glam::Vec2;

use crate::consts::WORLD_EXTENT;
use crate::ecs::components::*;
use crate::lights::{self, SafeLight};
use crate::util::geom;

/// Base speed when returning home; patrol drifts at half of it.
const PATROL_SPEED: f32 = 1.5;
const PATROL_DRIFT_FACTOR: f32 = 0.5;
/// A waypoint closer than this counts as reached.
const PATROL_ARRIVAL: f32 = 20.0;
/// Probability a waypoint is sampled in the near band around home.
const PATROL_NEAR_BIAS: f32 = 0.6;
/// Near band: up to 0.3 x territory. Far band: 0.3-0.7 x territory.
const PATROL_NEAR_RANGE: f32 = 0.3;
const PATROL_FAR_RANGE: f32 = 0.4;
/// Past this fraction of the territory the next waypoint is home itself.
const PATROL_PULL_BACK: f32 = 0.8;
/// Rest between waypoints: 120 + uniform(0..=180) ticks (2-5 s).
const REST_BASE_TICKS: u32 = 120;
const REST_EXTRA_TICKS: u32 = 180;

/// Chase speed window; acceleration is slow so a long chase ramps up.
pub const MIN_CHASE_SPEED: f32 = 2.0;
const MAX_CHASE_SPEED: f32 = 3.3;
const CHASE_ACCEL: f32 = 0.008;
/// The chase is abandoned beyond this multiple of the detection radius.
const CHASE_GIVE_UP_FACTOR: f32 = 1.5;
/// Inside this distance the dog coasts instead of ramming through the cat.
const CHASE_CONTACT_DISTANCE: f32 = 5.0;
const CHASE_COAST_DAMPING: f32 = 0.9;

const ATTACK_RANGE: f32 = 40.0;
const ATTACK_DAMAGE: f32 = 20.0;
const ATTACK_COOLDOWN_TICKS: u32 = 60;

/// Home counts as reached inside this distance.
const HOME_ARRIVAL: f32 = 10.0;
/// Facing only flips above this horizontal speed.
const FACING_EPSILON: f32 = 0.1;

/// Advance every wild dog by one tick against the cat's current position.
pub fn update(
    world: &mut hecs::World,
    cat: hecs::Entity,
    safe_lights: &[SafeLight],
    rng: &mut fastrand::Rng,
) {
    let Ok(cat_pos) = world.get::<&Position>(cat).map(|p| p.0) else {
        return;
    };
    let cat_safe = lights::any_contains(safe_lights, cat_pos);

    let mut biters: Vec<hecs::Entity> = Vec::new();
    for (entity, (pos, vel, facing, brain, territory, body)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Facing,
        &mut DogBrain,
        &Territory,
        &Body,
    )>() {
        brain.alerted = false;

        let to_cat = cat_pos - pos.0;
        let cat_dist = to_cat.length();
        let to_home = territory.home - pos.0;
        let home_dist = to_home.length();

        match brain.state {
            DogState::Patrol => {
                patrol(pos, vel, brain, territory, rng);
                if cat_dist < territory.detection && !cat_safe {
                    brain.state = DogState::Chase;
                    brain.chase_speed = MIN_CHASE_SPEED;
                    brain.alerted = true;
                    log::debug!("dog {entity:?} spotted the cat at {cat_dist:.0} units");
                }
            }
            DogState::Chase => {
                if cat_dist > CHASE_CONTACT_DISTANCE && !cat_safe {
                    brain.chase_speed = (brain.chase_speed + CHASE_ACCEL).min(MAX_CHASE_SPEED);
                    vel.0 = (to_cat / cat_dist) * brain.chase_speed;

                    if cat_dist < ATTACK_RANGE && brain.attack_cooldown == 0 {
                        biters.push(entity);
                    }
                } else {
                    vel.0 *= CHASE_COAST_DAMPING;
                }

                let give_up = home_dist > territory.radius
                    || cat_safe
                    || cat_dist > territory.detection * CHASE_GIVE_UP_FACTOR;
                if give_up {
                    brain.state = DogState::Return;
                }
            }
            DogState::Return => {
                if home_dist > HOME_ARRIVAL {
                    vel.0 = (to_home / home_dist) * PATROL_SPEED;
                } else {
                    brain.state = DogState::Patrol;
                    brain.chase_speed = MIN_CHASE_SPEED;
                }
            }
        }

        pos.0 += vel.0;
        pos.0 = geom::clamp_to_world(pos.0, body.size, WORLD_EXTENT);
        if vel.0.x.abs() > FACING_EPSILON {
            facing.update_from(vel.0.x);
        }
        if brain.attack_cooldown > 0 {
            brain.attack_cooldown -= 1;
        }
    }

    // Bites resolve against the cat; only a landed hit starts the cooldown,
    // so a dog denied by invulnerability retries on the next tick.
    for dog in biters {
        let landed = world
            .get::<&mut Health>(cat)
            .map(|mut health| health.apply_damage(ATTACK_DAMAGE))
            .unwrap_or(false);
        if landed {
            log::debug!("dog {dog:?} bit the cat");
            if let Ok(mut brain) = world.get::<&mut DogBrain>(dog) {
                brain.attack_cooldown = ATTACK_COOLDOWN_TICKS;
            }
        }
    }
}

/// Waypoint patrol: drift to the current target, rest there, resample.
fn patrol(
    pos: &Position,
    vel: &mut Velocity,
    brain: &mut DogBrain,
    territory: &Territory,
    rng: &mut fastrand::Rng,
) {
    let plan = &mut brain.patrol;
    let target = match plan.target {
        Some(t) => t,
        None => {
            let t = sample_waypoint(territory, rng);
            plan.target = Some(t);
            plan.rest_ticks = 0;
            plan.rest_duration = 0;
            t
        }
    };

    let to_target = target - pos.0;
    let dist = to_target.length();
    if dist > PATROL_ARRIVAL {
        vel.0 = (to_target / dist) * (PATROL_SPEED * PATROL_DRIFT_FACTOR);
        plan.rest_ticks = 0;
    } else {
        vel.0 = Vec2::ZERO;
        if plan.rest_duration == 0 {
            plan.rest_duration = REST_BASE_TICKS + rng.u32(0..=REST_EXTRA_TICKS);
        }
        plan.rest_ticks += 1;
        if plan.rest_ticks > plan.rest_duration {
            plan.target = None;
            plan.rest_duration = 0;
        }
    }

    // Drifted too far out (e.g. after a chase): head home next.
    if pos.0.distance(territory.home) > territory.radius * PATROL_PULL_BACK {
        plan.target = Some(territory.home);
    }
}

fn sample_waypoint(territory: &Territory, rng: &mut fastrand::Rng) -> Vec2 {
    let angle = rng.f32() * std::f32::consts::TAU;
    let dist = if rng.f32() < PATROL_NEAR_BIAS {
        rng.f32() * territory.radius * PATROL_NEAR_RANGE
    } else {
        territory.radius * PATROL_NEAR_RANGE + rng.f32() * territory.radius * PATROL_FAR_RANGE
    };
    territory.home + Vec2::new(angle.cos(), angle.sin()) * dist
}
