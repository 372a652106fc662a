//! Read-only scene views for the renderer. Captured once per frame from a
//! session; the renderer picks sprites and bars off these values and never
//! touches the world itself. Everything is copied out, so a snapshot stays
//! valid while the next tick runs.

use glam::Vec2;

use crate::ecs::components::*;
use crate::level::{LevelId, Obstacle};
use crate::session::{ControlMode, HudFacts, Phase, Session};

/// Below this per-axis speed an entity is drawn standing still.
const MOVING_EPSILON: f32 = 0.1;

/// Visual variant tag for a player-driven body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Sitting,
    Walking,
    Running,
}

#[derive(Debug, Clone, Copy)]
pub struct MoverView {
    pub pos: Vec2,
    pub facing: Facing,
    pub pose: Pose,
    pub health: f32,
    pub max_health: f32,
    /// Drives the damage-flash effect.
    pub invulnerable: bool,
    /// `(current, max)`; absent for the player dog.
    pub stamina: Option<(f32, f32)>,
}

#[derive(Debug, Clone, Copy)]
pub struct DogView {
    pub pos: Vec2,
    pub facing: Facing,
    pub state: DogState,
    /// True on the tick the dog started chasing; audio glue plays the growl.
    pub alerted: bool,
    /// For the optional debug overlay.
    pub detection_radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct LightView {
    pub pos: Vec2,
    pub radius: f32,
    pub inner_radius: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ExitView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub pos: Vec2,
    pub viewport: Vec2,
}

/// One frame's worth of drawable state.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub phase: Phase,
    pub control: ControlMode,
    pub level: LevelId,
    pub camera: CameraView,
    pub cat: MoverView,
    pub player_dog: Option<MoverView>,
    pub dogs: Vec<DogView>,
    pub lights: Vec<LightView>,
    pub exit: ExitView,
    pub obstacles: Vec<Obstacle>,
    pub hud: HudFacts,
}

impl SceneSnapshot {
    pub fn capture(session: &Session) -> Self {
        let world = session.world();
        let ticks = session.ticks();

        let cat = mover_view(world, session.cat()).expect("session always has a cat");
        let player_dog = session.player_dog().and_then(|dog| mover_view(world, dog));

        let mut dogs = Vec::new();
        for (_, (pos, facing, brain, territory)) in world
            .query::<(&Position, &Facing, &DogBrain, &Territory)>()
            .iter()
        {
            dogs.push(DogView {
                pos: pos.0,
                facing: *facing,
                state: brain.state,
                alerted: brain.alerted,
                detection_radius: territory.detection,
            });
        }

        let lights = session
            .lights()
            .iter()
            .map(|light| LightView {
                pos: light.pos(),
                radius: light.radius(),
                inner_radius: light.inner_radius(),
                brightness: light.brightness(ticks),
            })
            .collect();

        Self {
            phase: session.phase(),
            control: session.control(),
            level: session.level(),
            camera: CameraView {
                pos: session.camera().pos(),
                viewport: session.camera().viewport(),
            },
            cat,
            player_dog,
            dogs,
            lights,
            exit: ExitView {
                pos: session.exit().pos(),
                radius: session.exit().reach_radius(),
            },
            obstacles: session.obstacles().to_vec(),
            hud: session.hud(),
        }
    }
}

fn mover_view(world: &hecs::World, entity: hecs::Entity) -> Option<MoverView> {
    let pos = world.get::<&Position>(entity).ok()?.0;
    let facing = *world.get::<&Facing>(entity).ok()?;
    let vel = world.get::<&Velocity>(entity).ok()?.0;
    let curve = *world.get::<&SpeedCurve>(entity).ok()?;
    let profile = *world.get::<&MoveProfile>(entity).ok()?;
    let health = *world.get::<&Health>(entity).ok()?;
    let stamina = world
        .get::<&Stamina>(entity)
        .ok()
        .map(|s| (s.current, s.max));
    let sitting = world.get::<&Rest>(entity).map_or(false, |r| r.sitting);

    let moving = vel.x.abs() > MOVING_EPSILON || vel.y.abs() > MOVING_EPSILON;
    let pose = if sitting {
        Pose::Sitting
    } else if !moving {
        Pose::Idle
    } else if curve.actual > profile.walk_speed {
        Pose::Running
    } else {
        Pose::Walking
    };

    Some(MoverView {
        pos,
        facing,
        pose,
        health: health.current,
        max_health: health.max,
        invulnerable: health.invulnerable(),
        stamina,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    fn session() -> Session {
        Session::with_seed(LevelId::Park, Vec2::new(800.0, 600.0), 4321)
    }

    #[test]
    fn capture_mirrors_the_session_roster() {
        let session = session();
        let snap = SceneSnapshot::capture(&session);

        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.control, ControlMode::Cat);
        assert_eq!(snap.level, LevelId::Park);
        assert_eq!(snap.dogs.len(), 15);
        assert_eq!(snap.lights.len(), 12);
        assert_eq!(snap.obstacles.len(), 30);
        assert!(snap.player_dog.is_none());
        assert_eq!(snap.cat.pose, Pose::Idle);
        assert!(snap.cat.stamina.is_some());
        for light in &snap.lights {
            assert!((0.79..=1.01).contains(&light.brightness));
            assert!((light.inner_radius - light.radius * 0.3).abs() < 1e-3);
        }
    }

    #[test]
    fn poses_follow_the_speed_curve() {
        let mut session = session();
        let walk = InputState {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            session.tick(&walk);
        }
        let snap = SceneSnapshot::capture(&session);
        assert_eq!(snap.cat.pose, Pose::Walking);
        assert_eq!(snap.cat.facing, Facing::Right);

        let sprint = InputState {
            right: true,
            run: true,
            ..Default::default()
        };
        for _ in 0..60 {
            session.tick(&sprint);
        }
        let snap = SceneSnapshot::capture(&session);
        assert_eq!(snap.cat.pose, Pose::Running);
        let (stamina, max) = snap.cat.stamina.unwrap();
        assert!(stamina < max);
    }

    #[test]
    fn player_dog_view_appears_after_switching() {
        let mut session = session();
        session.switch_control();
        let snap = SceneSnapshot::capture(&session);
        let dog = snap.player_dog.expect("dog view after switch");
        assert_eq!(snap.control, ControlMode::Dog);
        assert!(dog.stamina.is_none(), "the player dog has no stamina bar");
        assert_eq!(dog.max_health, 150.0);
    }
}
