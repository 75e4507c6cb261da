use serde::{Deserialize, Serialize};

pub const DEFAULT_PRESET_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced,
    Completed,
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub minutes: u32,
    pub seconds: u32,
    pub is_running: bool,
    pub current_task_id: Option<u64>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_PRESET_MINUTES,
            seconds: 0,
            is_running: false,
            current_task_id: None,
        }
    }
}

impl TimerState {
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        let was_running = self.is_running;
        self.is_running = false;
        was_running
    }

    pub fn reset(&mut self, minutes: u32) {
        self.is_running = false;
        self.minutes = minutes;
        self.seconds = 0;
    }

    /// Advances the countdown by exactly one elapsed second. A tick at 00:00
    /// completes the session (resetting to the default preset) instead of
    /// counting.
    pub fn tick(&mut self) -> Tick {
        if !self.is_running {
            return Tick::Ignored;
        }
        if self.seconds == 0 {
            if self.minutes == 0 {
                self.reset(DEFAULT_PRESET_MINUTES);
                return Tick::Completed;
            }
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.seconds -= 1;
        }
        Tick::Advanced
    }
}
