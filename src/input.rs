//! Per-tick input snapshot. The embedding glue (browser events, a test, or
//! the demo bot) fills one of these in each tick; the simulation never
//! talks to real input devices.

use glam::Vec2;

/// Held-key and pointer state for one tick.
///
/// Pointer clicks set a persistent movement target on the controlled
/// entity; held direction keys override the steering immediately without
/// clearing that target.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Sprint modifier (Shift). The cat additionally needs stamina.
    pub run: bool,
    /// World-space click position, if the pointer was pressed this tick.
    pub click: Option<Vec2>,
}

impl InputState {
    /// Keyboard direction with -1/0/1 components. Not normalized.
    pub fn axes(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }

    pub fn any_axis_held(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}
