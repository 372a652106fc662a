use glam::Vec2;

/// Current world position.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Velocity in world units per tick.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Horizontal facing, derived from the sign of horizontal motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Update from a horizontal motion component; zero leaves it unchanged.
    pub fn update_from(&mut self, dx: f32) {
        if dx > 0.0 {
            *self = Facing::Right;
        } else if dx < 0.0 {
            *self = Facing::Left;
        }
    }
}

/// Entity footprint. Used as the world-bounds margin and as the half-size
/// source for lamp collision.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub size: f32,
}

/// Per-entity speed-curve constants. `decel` is always >= `accel` so easing
/// off a sprint feels abrupt.
#[derive(Debug, Clone, Copy)]
pub struct MoveProfile {
    /// Kick-off floor: a standing start snaps up to this.
    pub min_speed: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub accel: f32,
    pub decel: f32,
}

impl MoveProfile {
    pub const CAT: Self = Self {
        min_speed: 0.5,
        walk_speed: 3.0,
        run_speed: 5.0,
        accel: 0.1,
        decel: 0.15,
    };

    pub const PLAYER_DOG: Self = Self {
        min_speed: 1.0,
        walk_speed: 4.0,
        run_speed: 7.0,
        accel: 0.15,
        decel: 0.2,
    };
}

/// Scalar speed state for the acceleration-curve model.
/// `cap` is reselected every tick from the run flag; `actual` chases it.
#[derive(Debug, Clone, Copy)]
pub struct SpeedCurve {
    pub actual: f32,
    pub cap: f32,
}

impl SpeedCurve {
    pub fn at_rest(walk_speed: f32) -> Self {
        Self {
            actual: 0.0,
            cap: walk_speed,
        }
    }
}

/// Pointer-set movement destination. Cleared on arrival or when a lamp
/// collision interrupts pointer-driven travel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveTarget(pub Option<Vec2>);

/// Health pool with a post-hit invulnerability countdown.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Ticks of invulnerability remaining; damage is rejected while > 0.
    pub invuln_ticks: u32,
}

/// Invulnerability window granted by a successful hit.
pub const INVULN_TICKS: u32 = 60;

impl Health {
    pub fn full(max: f32) -> Self {
        Self {
            current: max,
            max,
            invuln_ticks: 0,
        }
    }

    pub fn invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    /// Apply a hit. Returns false (a silent no-op) while invulnerable;
    /// otherwise subtracts, floors at zero, opens the invulnerability
    /// window and returns true so the attacker can start its cooldown.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.invulnerable() {
            return false;
        }
        self.current = (self.current - amount).max(0.0);
        self.invuln_ticks = INVULN_TICKS;
        true
    }

    /// Per-tick countdown; runs every tick regardless of other activity.
    pub fn countdown(&mut self) {
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
    }
}

/// Sprint fuel. Cat only.
#[derive(Debug, Clone, Copy)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    pub const DRAIN_PER_TICK: f32 = 0.5;
    pub const REGEN_PER_TICK: f32 = 0.3;

    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Idle bookkeeping driving the "sitting" display state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rest {
    pub idle_ticks: u32,
    pub sitting: bool,
}

/// Consecutive idle ticks before the cat sits down (3 s).
pub const SIT_THRESHOLD: u32 = 180;

/// Marker: this entity is blocked by lamp posts. Only the cat carries it.
#[derive(Debug, Clone, Copy)]
pub struct LampBound;

/// Wild-dog behavior state. An explicit enum so transitions stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogState {
    Patrol,
    Chase,
    Return,
}

/// Waypoint-patrol bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatrolPlan {
    pub target: Option<Vec2>,
    pub rest_ticks: u32,
    pub rest_duration: u32,
}

/// The wild dog's head: state machine plus chase/attack bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct DogBrain {
    pub state: DogState,
    /// Chase speed, monotone non-decreasing while the chase lasts.
    pub chase_speed: f32,
    /// Ticks until the next bite is allowed.
    pub attack_cooldown: u32,
    pub patrol: PatrolPlan,
    /// Set on the tick the dog enters Chase (the growl edge), cleared the
    /// next tick. Renderer/audio glue reads it from the snapshot.
    pub alerted: bool,
}

impl DogBrain {
    pub fn new(min_chase_speed: f32) -> Self {
        Self {
            state: DogState::Patrol,
            chase_speed: min_chase_speed,
            attack_cooldown: 0,
            patrol: PatrolPlan::default(),
            alerted: false,
        }
    }
}

/// Immutable territory anchored at the spawn point.
#[derive(Debug, Clone, Copy)]
pub struct Territory {
    pub home: Vec2,
    pub radius: f32,
    pub detection: f32,
}
