//! Session lifecycle and the headless demo driver.
//!
//! `Game` owns exactly one session at a time; restart and level select
//! tear the old one down wholesale and build a fresh one. `run_demo`
//! drives a session with a scripted pilot (head for the exit, sprint when
//! a dog is on the cat's tail) and logs timing stats on the way.

use glam::Vec2;
use instant::Instant;

use crate::debug::TickPhase;
use crate::input::InputState;
use crate::level::LevelId;
use crate::session::{Phase, Session};

/// Stats are logged every this many wall-clock seconds.
const STATS_LOG_INTERVAL: f64 = 5.0;
/// The demo pilot re-aims at the exit this often.
const RETARGET_INTERVAL: u64 = 120;
/// Demo sessions give up after this many ticks (5 minutes of game time).
pub const DEMO_TICK_CAP: u64 = 18_000;

// ---------------------------------------------------------------------------
// Tick timing
// ---------------------------------------------------------------------------

struct FrameStats {
    tick_count: u64,
    last_log_time: Instant,
    tick_time_sum: f64,
    tick_time_min: f64,
    tick_time_max: f64,
    ticks_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            tick_count: 0,
            last_log_time: Instant::now(),
            tick_time_sum: 0.0,
            tick_time_min: f64::MAX,
            tick_time_max: 0.0,
            ticks_since_log: 0,
        }
    }

    fn record_tick(&mut self, dt: f64) {
        self.tick_count += 1;
        self.ticks_since_log += 1;
        self.tick_time_sum += dt;
        self.tick_time_min = self.tick_time_min.min(dt);
        self.tick_time_max = self.tick_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            let avg_us = (self.tick_time_sum / self.ticks_since_log as f64) * 1_000_000.0;
            log::info!(
                "ticks/s: {:.0} | avg: {:.1}us | min: {:.1}us | max: {:.1}us | total ticks: {}",
                self.ticks_since_log as f64 / elapsed,
                avg_us,
                self.tick_time_min * 1_000_000.0,
                self.tick_time_max * 1_000_000.0,
                self.tick_count,
            );
            self.last_log_time = Instant::now();
            self.tick_time_sum = 0.0;
            self.tick_time_min = f64::MAX;
            self.tick_time_max = 0.0;
            self.ticks_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// The one-session-at-a-time wrapper the menu glue talks to.
pub struct Game {
    session: Session,
    level: LevelId,
    viewport: Vec2,
}

impl Game {
    pub fn new(level: LevelId, viewport: Vec2) -> Self {
        Self {
            session: Session::new(level, viewport),
            level,
            viewport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    /// Throw the current session away and start the same level over.
    pub fn restart(&mut self) {
        log::info!("restarting {:?}", self.level);
        self.session = Session::new(self.level, self.viewport);
    }

    /// Throw the current session away and start `level`.
    pub fn start_level(&mut self, level: LevelId) {
        log::info!("starting {level:?}");
        self.level = level;
        self.session = Session::new(level, self.viewport);
    }
}

// ---------------------------------------------------------------------------
// Headless demo
// ---------------------------------------------------------------------------

/// Drive `game` with the scripted pilot until the session ends or
/// `max_ticks` elapse. Returns the final phase.
pub fn run_demo(game: &mut Game, max_ticks: u64) -> Phase {
    let exit_pos = game.session().exit().pos();
    let mut stats = FrameStats::new();
    let mut last = Instant::now();

    while game.session().phase() == Phase::Running && game.session().ticks() < max_ticks {
        let hud = game.session().hud();
        let retarget = game.session().ticks() % RETARGET_INTERVAL == 0;
        let input = InputState {
            run: hud.danger,
            click: if retarget { Some(exit_pos) } else { None },
            ..Default::default()
        };
        game.session_mut().tick(&input);

        let now = Instant::now();
        stats.record_tick(now.duration_since(last).as_secs_f64());
        last = now;
    }

    for phase in TickPhase::ALL {
        log::debug!(
            "{}: {:.1}us avg",
            phase.label(),
            game.session().timers.durations_us[phase as usize],
        );
    }

    let outcome = game.session().phase();
    log::info!(
        "demo over after {} ticks: {outcome:?}",
        game.session().ticks()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_replaces_the_session_wholesale() {
        let mut game = Game::new(LevelId::Streets, Vec2::new(800.0, 600.0));
        for _ in 0..20 {
            game.session_mut().tick(&InputState::default());
        }
        assert_eq!(game.session().ticks(), 20);

        game.restart();
        assert_eq!(game.session().ticks(), 0);
        assert_eq!(game.session().phase(), Phase::Running);
        assert_eq!(game.level(), LevelId::Streets);
    }

    #[test]
    fn level_select_carries_the_new_level() {
        let mut game = Game::new(LevelId::Streets, Vec2::new(800.0, 600.0));
        game.start_level(LevelId::Ruins);
        assert_eq!(game.level(), LevelId::Ruins);
        assert_eq!(game.session().level(), LevelId::Ruins);
    }

    #[test]
    fn demo_pilot_advances_the_session() {
        let mut game = Game::new(LevelId::Streets, Vec2::new(800.0, 600.0));
        let outcome = run_demo(&mut game, 50);
        assert!(game.session().ticks() <= 50);
        assert!(game.session().ticks() > 0);
        if game.session().ticks() == 50 {
            assert_eq!(outcome, Phase::Running);
        }
    }
}
