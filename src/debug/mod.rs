pub mod timer;

pub use timer::{TickPhase, TickTimers};
