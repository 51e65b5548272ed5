//! Keyboard and mouse → intent mapping
//!
//! Polling never blocks: everything pending is drained and anything that is
//! not a recognised key press or left click is dropped.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::sim::{GamePhase, Intent};

/// Start on the menu, flap while playing, restart after a crash
fn primary_action(phase: GamePhase) -> Intent {
    match phase {
        GamePhase::Menu => Intent::Start,
        GamePhase::GameOver => Intent::Restart,
        GamePhase::Playing | GamePhase::Paused => Intent::Flap,
    }
}

/// Map one key press to an intent.
///
/// Space and Enter are the primary action.
pub fn intent_for_key(key: &KeyEvent, phase: GamePhase) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(primary_action(phase)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Restart),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Intent::PauseToggle),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ToggleMute),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::Flap),
        _ => None,
    }
}

/// A left click anywhere is the primary action
pub fn intent_for_mouse(ev: &MouseEvent, phase: GamePhase) -> Option<Intent> {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(primary_action(phase)),
        _ => None,
    }
}

/// Drains pending terminal events into intents
#[derive(Debug, Default)]
pub struct InputAdapter;

impl InputAdapter {
    pub fn new() -> Self {
        Self
    }

    /// All intents pending right now, deduplicated, in arrival order
    pub fn poll(&mut self, phase: GamePhase) -> io::Result<Vec<Intent>> {
        let mut intents = Vec::new();
        while event::poll(Duration::ZERO)? {
            let intent = match event::read()? {
                Event::Key(key) => intent_for_key(&key, phase),
                Event::Mouse(mouse) => intent_for_mouse(&mouse, phase),
                _ => None,
            };
            if let Some(intent) = intent
                && !intents.contains(&intent)
            {
                intents.push(intent);
            }
        }
        Ok(intents)
    }
}
