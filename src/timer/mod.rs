pub mod state;

pub use state::{Tick, TimerState, DEFAULT_PRESET_MINUTES};
