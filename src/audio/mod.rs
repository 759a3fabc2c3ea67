//! Sound cues
//!
//! The game only ever fires sounds and forgets them; nothing reads back
//! from the audio side. A terminal has one sound, the bell, so that is what
//! [`TerminalBell`] rings for every cue.

use crossterm::{execute, style::Print};
use std::io::{stderr, Write};
use tracing::debug;

use crate::game::GameEvent;

/// A sound the front-end asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A menu button was pressed
    Click,
    /// The player ate something
    FoodEaten,
    /// The player died
    RoundOver,
}

impl SoundCue {
    /// The cue a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::FoodEaten | GameEvent::EnemyAbsorbed { .. } => Some(SoundCue::FoodEaten),
            GameEvent::RoundOver { .. } => Some(SoundCue::RoundOver),
            GameEvent::EnemyAteFood => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<std::io::Stderr> {
    pub fn new() -> Self {
        Self { out: stderr() }
    }
}

impl Default for TerminalBell<std::io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        // A missed beep is not worth interrupting the game for
        if let Err(err) = execute!(self.out, Print('\x07')) {
            debug!(?cue, %err, "failed to ring terminal bell");
        }
    }
}
