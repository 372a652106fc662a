use glam::Vec2;

use alleycat::app::{self, Game};
use alleycat::level::LevelId;

fn main() {
    env_logger::init();
    log::info!("alleycat demo session starting");

    let mut game = Game::new(LevelId::default(), Vec2::new(1280.0, 720.0));
    app::run_demo(&mut game, app::DEMO_TICK_CAP);
}
