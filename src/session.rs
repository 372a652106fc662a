//! One game session: the world, its furniture, and the tick loop.
//!
//! A session is built whole and torn down whole; restart and level select
//! replace it rather than rewinding it. `tick` advances everything in a
//! fixed order so the dogs always act on the cat's position from the same
//! tick: controlled mover, camera, dogs, then the win/lose verdict.

use glam::Vec2;

use crate::camera::Camera;
use crate::consts::WORLD_EXTENT;
use crate::debug::{TickPhase, TickTimers};
use crate::ecs::components::*;
use crate::ecs::{spawn, systems};
use crate::exit::Exit;
use crate::input::InputState;
use crate::level::{self, LevelId, Obstacle};
use crate::lights::{self, SafeLight};

/// Streetlights per session.
const LIGHT_COUNT: usize = 12;
/// Wild dogs per session.
const WILD_DOG_COUNT: usize = 15;
/// Dogs spawn at least this far from the world edge.
const SPAWN_MARGIN: f32 = 200.0;
/// Where the cat wakes up.
const CAT_START: Vec2 = Vec2::new(200.0, 200.0);

/// Session lifecycle state. Terminal states freeze the simulation; the
/// only way forward is a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Won,
    Over,
}

/// Which entity is reading the player's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Cat,
    Dog,
}

/// Per-tick facts the HUD glue displays.
#[derive(Debug, Clone, Copy)]
pub struct HudFacts {
    pub cat_in_safe_zone: bool,
    /// A chasing dog has the cat inside its detection radius and the cat
    /// is not under a light.
    pub danger: bool,
    /// Distance from the controlled entity to the exit.
    pub exit_distance: f32,
}

pub struct Session {
    world: hecs::World,
    cat: hecs::Entity,
    player_dog: Option<hecs::Entity>,
    lights: Vec<SafeLight>,
    exit: Exit,
    obstacles: Vec<Obstacle>,
    camera: Camera,
    rng: fastrand::Rng,
    level: LevelId,
    phase: Phase,
    control: ControlMode,
    ticks: u64,
    /// Per-phase tick timing, logged by the driver.
    pub timers: TickTimers,
}

impl Session {
    pub fn new(level: LevelId, viewport: Vec2) -> Self {
        Self::build(level, viewport, fastrand::Rng::new())
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(level: LevelId, viewport: Vec2, seed: u64) -> Self {
        Self::build(level, viewport, fastrand::Rng::with_seed(seed))
    }

    fn build(level: LevelId, viewport: Vec2, mut rng: fastrand::Rng) -> Self {
        let mut world = hecs::World::new();
        let lights = lights::scatter(&mut rng, LIGHT_COUNT);
        let cat = spawn::spawn_cat(&mut world, CAT_START);
        spawn::spawn_wild_dogs(
            &mut world,
            WILD_DOG_COUNT,
            &lights,
            SPAWN_MARGIN,
            WORLD_EXTENT,
            &mut rng,
        );
        let exit = Exit::random_edge(&mut rng);
        let obstacles = level::scatter_obstacles(&mut rng);
        log::info!(
            "session up: {level:?}, {LIGHT_COUNT} lights, {WILD_DOG_COUNT} dogs, exit at ({:.0}, {:.0})",
            exit.pos().x,
            exit.pos().y,
        );

        Self {
            world,
            cat,
            player_dog: None,
            lights,
            exit,
            obstacles,
            camera: Camera::new(viewport),
            rng,
            level,
            phase: Phase::Running,
            control: ControlMode::Cat,
            ticks: 0,
            timers: TickTimers::new(),
        }
    }

    /// Advance one simulation tick. A no-op once the session has ended.
    pub fn tick(&mut self, input: &InputState) {
        if self.phase != Phase::Running {
            return;
        }

        let controlled = self.controlled();
        if let Some(click) = input.click {
            if let Ok(mut target) = self.world.get::<&mut MoveTarget>(controlled) {
                target.0 = Some(click);
            }
        }

        self.timers.begin();
        systems::mover::update(&mut self.world, controlled, input, &self.lights);
        systems::countdown_invulnerability(&mut self.world);
        self.timers.end(TickPhase::Mover);

        self.timers.begin();
        if let Ok(pos) = self.world.get::<&Position>(controlled) {
            self.camera.follow(pos.0);
        }
        self.camera.update();
        self.timers.end(TickPhase::Camera);

        self.timers.begin();
        systems::dogs::update(&mut self.world, self.cat, &self.lights, &mut self.rng);
        self.timers.end(TickPhase::Dogs);

        self.timers.begin();
        let cat_pos = self.cat_position();
        if self.exit.reached(cat_pos) {
            self.phase = Phase::Won;
            log::info!("the cat slipped out after {} ticks", self.ticks);
        } else if self.cat_health().current <= 0.0 {
            self.phase = Phase::Over;
            log::info!("the dogs got the cat after {} ticks", self.ticks);
        }
        self.timers.end(TickPhase::Outcome);

        self.ticks += 1;
    }

    /// Hand the controls to the other body. The first switch spawns the
    /// player dog where the cat stands; switching back teleports the cat
    /// to wherever the dog wandered.
    pub fn switch_control(&mut self) {
        match self.control {
            ControlMode::Cat => {
                if self.player_dog.is_none() {
                    let here = self.cat_position();
                    self.player_dog = Some(spawn::spawn_player_dog(&mut self.world, here));
                }
                self.control = ControlMode::Dog;
                log::debug!("controls handed to the dog");
            }
            ControlMode::Dog => {
                if let Some(dog) = self.player_dog {
                    if let Some(dog_pos) =
                        self.world.get::<&Position>(dog).map(|p| p.0).ok()
                    {
                        if let Ok(mut pos) = self.world.get::<&mut Position>(self.cat) {
                            pos.0 = dog_pos;
                        }
                    }
                }
                self.control = ControlMode::Cat;
                log::debug!("controls handed back to the cat");
            }
        }
    }

    /// The entity currently reading input.
    pub fn controlled(&self) -> hecs::Entity {
        match self.control {
            ControlMode::Cat => self.cat,
            ControlMode::Dog => self.player_dog.unwrap_or(self.cat),
        }
    }

    pub fn hud(&self) -> HudFacts {
        let cat_pos = self.cat_position();
        let cat_in_safe_zone = lights::any_contains(&self.lights, cat_pos);

        let mut dog_nearby = false;
        for (_, (pos, brain, territory)) in self
            .world
            .query::<(&Position, &DogBrain, &Territory)>()
            .iter()
        {
            if brain.state == DogState::Chase && pos.0.distance(cat_pos) < territory.detection {
                dog_nearby = true;
                break;
            }
        }

        let focus = self
            .world
            .get::<&Position>(self.controlled())
            .map(|p| p.0)
            .unwrap_or(cat_pos);
        HudFacts {
            cat_in_safe_zone,
            danger: dog_nearby && !cat_in_safe_zone,
            exit_distance: focus.distance(self.exit.pos()),
        }
    }

    fn cat_position(&self) -> Vec2 {
        self.world
            .get::<&Position>(self.cat)
            .map(|p| p.0)
            .unwrap_or(CAT_START)
    }

    fn cat_health(&self) -> Health {
        self.world
            .get::<&Health>(self.cat)
            .map(|h| *h)
            .unwrap_or(Health::full(0.0))
    }

    // Read-only access for the renderer/snapshot side.

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn cat(&self) -> hecs::Entity {
        self.cat
    }

    pub fn player_dog(&self) -> Option<hecs::Entity> {
        self.player_dog
    }

    pub fn lights(&self) -> &[SafeLight] {
        &self.lights
    }

    pub fn exit(&self) -> &Exit {
        &self.exit
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn control(&self) -> ControlMode {
        self.control
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::systems::dogs;

    /// A bare arena: just the cat, a distant exit, no dogs, no lights.
    fn bare_session() -> Session {
        let mut world = hecs::World::new();
        let cat = spawn::spawn_cat(&mut world, CAT_START);
        Session {
            world,
            cat,
            player_dog: None,
            lights: Vec::new(),
            exit: Exit::new(Vec2::new(2900.0, 1500.0)),
            obstacles: Vec::new(),
            camera: Camera::new(Vec2::new(800.0, 600.0)),
            rng: fastrand::Rng::with_seed(99),
            level: LevelId::Streets,
            phase: Phase::Running,
            control: ControlMode::Cat,
            ticks: 0,
            timers: TickTimers::new(),
        }
    }

    fn idle() -> InputState {
        InputState::default()
    }

    #[test]
    fn unattended_cat_sits_down_with_zero_speed() {
        let mut session = bare_session();
        for _ in 0..200 {
            session.tick(&idle());
        }
        let rest = session.world.get::<&Rest>(session.cat).unwrap();
        assert!(rest.sitting);
        drop(rest);
        let curve = session.world.get::<&SpeedCurve>(session.cat).unwrap();
        assert_eq!(curve.actual, 0.0);
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn dog_next_to_the_cat_starts_chasing_after_one_tick() {
        let mut session = bare_session();
        session.world.get::<&mut Position>(session.cat).unwrap().0 = Vec2::new(520.0, 500.0);
        let dog = spawn::spawn_wild_dog(&mut session.world, Vec2::new(500.0, 500.0));

        session.tick(&idle());
        let brain = session.world.get::<&DogBrain>(dog).unwrap();
        assert_eq!(brain.state, DogState::Chase);
    }

    #[test]
    fn lethal_bite_ends_the_session_and_freezes_it() {
        let mut session = bare_session();
        session.world.get::<&mut Position>(session.cat).unwrap().0 = Vec2::new(520.0, 500.0);
        session.world.get::<&mut Health>(session.cat).unwrap().current = 20.0;
        let dog = spawn::spawn_wild_dog(&mut session.world, Vec2::new(500.0, 500.0));
        session
            .world
            .get::<&mut DogBrain>(dog)
            .unwrap()
            .state = DogState::Chase;

        session.tick(&idle());
        assert_eq!(session.world.get::<&Health>(session.cat).unwrap().current, 0.0);
        assert_eq!(session.phase(), Phase::Over);

        // The follow-up attack never happens: the session is frozen.
        let ticks = session.ticks();
        session.tick(&idle());
        assert_eq!(session.ticks(), ticks);
        assert_eq!(session.world.get::<&Health>(session.cat).unwrap().current, 0.0);
    }

    #[test]
    fn reaching_the_exit_wins_and_stops_all_movement() {
        let mut session = bare_session();
        session.world.get::<&mut Position>(session.cat).unwrap().0 = session.exit.pos();

        session.tick(&idle());
        assert_eq!(session.phase(), Phase::Won);

        let before = session.world.get::<&Position>(session.cat).unwrap().0;
        let push = InputState {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            session.tick(&push);
        }
        let after = session.world.get::<&Position>(session.cat).unwrap().0;
        assert_eq!(before, after);
    }

    #[test]
    fn clicks_set_a_target_on_the_controlled_entity() {
        let mut session = bare_session();
        let click = InputState {
            click: Some(Vec2::new(400.0, 200.0)),
            ..Default::default()
        };
        session.tick(&click);
        assert!(session
            .world
            .get::<&MoveTarget>(session.cat)
            .unwrap()
            .0
            .is_some());

        for _ in 0..200 {
            session.tick(&idle());
        }
        let pos = session.world.get::<&Position>(session.cat).unwrap().0;
        assert!(pos.x > 350.0, "cat never walked toward the click");
    }

    #[test]
    fn control_switch_spawns_the_dog_and_teleports_the_cat_back() {
        let mut session = bare_session();
        session.switch_control();
        assert_eq!(session.control(), ControlMode::Dog);
        let dog = session.player_dog().expect("dog spawned on first switch");
        assert_eq!(
            session.world.get::<&Position>(dog).unwrap().0,
            CAT_START
        );

        // Walk the dog somewhere, then hand back.
        let push = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..60 {
            session.tick(&push);
        }
        let dog_pos = session.world.get::<&Position>(dog).unwrap().0;
        assert!(dog_pos.distance(CAT_START) > 50.0);

        session.switch_control();
        assert_eq!(session.control(), ControlMode::Cat);
        assert_eq!(session.world.get::<&Position>(session.cat).unwrap().0, dog_pos);
    }

    #[test]
    fn wild_dogs_ignore_the_player_dog() {
        let mut session = bare_session();
        let dog = spawn::spawn_wild_dog(&mut session.world, Vec2::new(1500.0, 1500.0));
        session.switch_control();
        // Park the player dog inside the wild dog's detection radius while
        // the cat stays far away.
        let player = session.player_dog().unwrap();
        session.world.get::<&mut Position>(player).unwrap().0 = Vec2::new(1520.0, 1500.0);

        for _ in 0..30 {
            session.tick(&idle());
        }
        assert_eq!(
            session.world.get::<&DogBrain>(dog).unwrap().state,
            DogState::Patrol
        );
    }

    #[test]
    fn hud_reports_safe_zone_and_danger() {
        let mut session = bare_session();
        let cat_pos = Vec2::new(600.0, 600.0);
        session.world.get::<&mut Position>(session.cat).unwrap().0 = cat_pos;
        session.lights = vec![SafeLight::new(cat_pos, 0.0)];

        let hud = session.hud();
        assert!(hud.cat_in_safe_zone);
        assert!(!hud.danger);

        // Drop the light and stage a chasing dog next door.
        session.lights.clear();
        let dog = spawn::spawn_wild_dog(&mut session.world, Vec2::new(650.0, 600.0));
        session.world.get::<&mut DogBrain>(dog).unwrap().state = DogState::Chase;
        let hud = session.hud();
        assert!(!hud.cat_in_safe_zone);
        assert!(hud.danger);
    }

    #[test]
    fn full_session_smoke_run() {
        let mut session = Session::with_seed(LevelId::Ruins, Vec2::new(800.0, 600.0), 1234);
        assert_eq!(session.lights().len(), 12);
        assert_eq!(
            session.world().query::<&DogBrain>().iter().count(),
            15
        );

        for _ in 0..600 {
            session.tick(&idle());
            let pos = session.world.get::<&Position>(session.cat).unwrap().0;
            assert!(pos.x >= 0.0 && pos.x <= WORLD_EXTENT);
            assert!(pos.y >= 0.0 && pos.y <= WORLD_EXTENT);
            // Chase speeds stay inside their window for every dog.
            for (_, brain) in session.world().query::<&DogBrain>().iter() {
                assert!(brain.chase_speed >= dogs::MIN_CHASE_SPEED - 1e-6);
                assert!(brain.chase_speed <= 3.3 + 1e-6);
            }
        }
    }
}
