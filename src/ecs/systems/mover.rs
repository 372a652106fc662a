//! Player-controlled movement: the acceleration-curve speed model, pointer
//! targeting, lamp collision and world-bounds clamping, plus the stamina
//! and idle bookkeeping that ride along with it. Drives whichever entity
//! currently holds the controls; the same code serves cat and player dog
//! through their `MoveProfile`.

use glam::Vec2;

use crate::consts::WORLD_EXTENT;
use crate::ecs::components::*;
use crate::ecs::systems::collision::{self, AxisBlock};
use crate::input::InputState;
use crate::lights::SafeLight;
use crate::util::geom;

/// Distance at which a pointer target counts as reached and is cleared.
const ARRIVAL_DISTANCE: f32 = 10.0;
/// Per-tick velocity multiplier while no direction is held.
const IDLE_DAMPING: f32 = 0.85;
/// Below this per-axis speed the velocity snaps to exact zero.
const STOP_EPSILON: f32 = 0.05;
/// Below this per-axis speed the entity counts as visually still.
const MOVING_EPSILON: f32 = 0.1;

/// Advance the controlled entity by one tick.
pub fn update(
    world: &mut hecs::World,
    entity: hecs::Entity,
    input: &InputState,
    lights: &[SafeLight],
) {
    let Ok((profile, curve, pos, vel, target, facing, body, mut stamina, rest, lamp_bound)) =
        world.query_one_mut::<(
            &MoveProfile,
            &mut SpeedCurve,
            &mut Position,
            &mut Velocity,
            &mut MoveTarget,
            &mut Facing,
            &Body,
            Option<&mut Stamina>,
            Option<&mut Rest>,
            Option<&LampBound>,
        )>(entity)
    else {
        return;
    };

    // Held keys steer immediately; an active pointer target only drives the
    // entity while no axis is held, and arrival clears it either way.
    let key_dir = input.axes();
    let mut dir = key_dir;
    if let Some(dest) = target.0 {
        let to = dest - pos.0;
        let dist = to.length();
        if dist <= ARRIVAL_DISTANCE {
            target.0 = None;
        } else if !input.any_axis_held() {
            dir = to / dist;
        }
    }
    let moving = dir != Vec2::ZERO;

    // Sprint gate: the cat needs fuel, the player dog just needs Shift.
    let has_fuel = stamina.as_deref().map_or(true, |s| s.current > 0.0);
    let running = input.run && has_fuel;
    curve.cap = if running {
        profile.run_speed
    } else {
        profile.walk_speed
    };

    if moving {
        if curve.actual < curve.cap {
            curve.actual += profile.accel;
            // A standing start kicks off at min_speed instead of crawling.
            if curve.actual < profile.min_speed {
                curve.actual = profile.min_speed;
            }
            if curve.actual > curve.cap {
                curve.actual = curve.cap;
            }
        } else if curve.actual > curve.cap {
            // Easing off a sprint: decel is faster than accel.
            curve.actual = (curve.actual - profile.decel).max(curve.cap);
        }

        let unit = geom::dir_or_zero(dir);
        vel.0 = unit * curve.actual;
        facing.update_from(unit.x);
    } else {
        curve.actual = (curve.actual - profile.decel).max(0.0);
        vel.0 *= IDLE_DAMPING;
        if vel.0.x.abs() < STOP_EPSILON {
            vel.0.x = 0.0;
        }
        if vel.0.y.abs() < STOP_EPSILON {
            vel.0.y = 0.0;
        }
    }

    // Axis-separated lamp collision, then commit whatever survives.
    let candidate = pos.0 + vel.0;
    let block = if lamp_bound.is_some() {
        collision::check(pos.0, candidate, body.size, lights)
    } else {
        AxisBlock::default()
    };
    if block.any() && target.0.is_some() {
        // Pointer travel into a post stops dead; keyboard travel only
        // loses the blocked axis.
        target.0 = None;
        vel.0 = Vec2::ZERO;
        curve.actual = 0.0;
    }
    if !block.x {
        pos.0.x = candidate.x;
    }
    if !block.y {
        pos.0.y = candidate.y;
    }
    pos.0 = geom::clamp_to_world(pos.0, body.size, WORLD_EXTENT);

    if let Some(stamina) = stamina.as_deref_mut() {
        if running && moving {
            stamina.current = (stamina.current - Stamina::DRAIN_PER_TICK).max(0.0);
        } else if !running {
            stamina.current = (stamina.current + Stamina::REGEN_PER_TICK).min(stamina.max);
        }
    }

    if let Some(rest) = rest {
        let visibly_moving =
            vel.0.x.abs() > MOVING_EPSILON || vel.0.y.abs() > MOVING_EPSILON;
        if visibly_moving {
            rest.idle_ticks = 0;
            rest.sitting = false;
        } else {
            rest.idle_ticks += 1;
            if rest.idle_ticks > SIT_THRESHOLD {
                rest.sitting = true;
            }
        }
    }
}
