//! Which screen the front-end shows, and how keys move between them
//!
//! The simulation knows nothing about screens. This is the small state
//! machine around it: title menu, playing, game over, and back to playing.

use crate::game::CollisionType;
use crate::input::KeyAction;

/// A two-button row: start on the left, quit on the right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Play,
    Quit,
}

impl Button {
    fn toggled(self) -> Self {
        match self {
            Button::Play => Button::Quit,
            Button::Quit => Button::Play,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu {
        selected: Button,
    },
    Playing,
    GameOver {
        final_score: u32,
        cause: CollisionType,
        selected: Button,
    },
}

/// What the controller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Nothing beyond a possible redraw
    Stay,
    /// Build a new round and switch to playing
    StartRound,
    Quit,
}

impl Screen {
    pub fn menu() -> Self {
        Screen::Menu {
            selected: Button::Play,
        }
    }

    pub fn game_over(final_score: u32, cause: CollisionType) -> Self {
        Screen::GameOver {
            final_score,
            cause,
            selected: Button::Play,
        }
    }

    pub fn on_key(&mut self, action: KeyAction) -> ScreenCommand {
        match self {
            Screen::Playing => match action {
                KeyAction::Quit => ScreenCommand::Quit,
                KeyAction::Restart => ScreenCommand::StartRound,
                _ => ScreenCommand::Stay,
            },
            Screen::Menu { selected } | Screen::GameOver { selected, .. } => match action {
                KeyAction::Steer(_) => {
                    *selected = selected.toggled();
                    ScreenCommand::Stay
                }
                KeyAction::Confirm => match selected {
                    Button::Play => ScreenCommand::StartRound,
                    Button::Quit => ScreenCommand::Quit,
                },
                KeyAction::Restart => ScreenCommand::StartRound,
                KeyAction::Quit => ScreenCommand::Quit,
                KeyAction::None => ScreenCommand::Stay,
            },
        }
    }

    /// True when a key press on this screen would press a button
    pub fn is_button_press(&self, action: KeyAction) -> bool {
        !matches!(self, Screen::Playing)
            && matches!(action, KeyAction::Confirm | KeyAction::Restart)
    }
}
