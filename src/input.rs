//! Input tracking
//!
//! Discrete press/release events for the four directional buttons,
//! with per-frame `downs` counters in addition to the held state.

/// Directional buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
}

/// State of one button
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// Presses since the counters were last cleared
    pub downs: u8,
    /// Currently held
    pub pressed: bool,
}

/// All tracked buttons
#[derive(Debug, Clone, Default)]
pub struct Input {
    pub left: ButtonState,
    pub right: ButtonState,
    pub up: ButtonState,
    pub down: ButtonState,
}

impl Input {
    /// Create input state with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release event
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        let state = match button {
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
        };
        if pressed && !state.pressed {
            state.downs = state.downs.saturating_add(1);
        }
        state.pressed = pressed;
    }

    /// Reset the per-frame press counters, keeping held state
    pub fn clear_downs(&mut self) {
        self.left.downs = 0;
        self.right.downs = 0;
        self.up.downs = 0;
        self.down.downs = 0;
    }
}
