use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;

use crate::game::{Action, Direction};

/// What a key press means to the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Arrow key or WASD; buffered for the next tick
    Steer(Direction),
    /// Press the highlighted button
    Confirm,
    Restart,
    Quit,
    None,
}

/// Steering keys kept between ticks
const STEER_BUFFER: usize = 2;

/// Turns key presses into actions and buffers steering between ticks
///
/// The terminal reports presses rather than held keys. Up to two turns are
/// queued and handed to the engine one per tick, so a quick Up-then-Left
/// while heading Right becomes two turns instead of one rejected reversal.
/// A key that repeats or reverses the turn queued before it is dropped; with
/// the queue full the newest key replaces the second slot.
#[derive(Debug, Default)]
pub struct InputHandler {
    pending: VecDeque<Direction>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = steering(key.code) {
            self.queue_turn(direction);
            return KeyAction::Steer(direction);
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    /// Input for the coming tick; takes the oldest queued turn
    pub fn take_action(&mut self) -> Action {
        self.pending.pop_front().into()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn queue_turn(&mut self, direction: Direction) {
        let full = self.pending.len() >= STEER_BUFFER;
        let before = if full {
            self.pending.get(STEER_BUFFER - 2)
        } else {
            self.pending.back()
        };

        if before.is_some_and(|&prev| prev == direction || prev.is_opposite(direction)) {
            return;
        }
        if full {
            self.pending.pop_back();
        }
        self.pending.push_back(direction);
    }
}

fn steering(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(direction)
}
