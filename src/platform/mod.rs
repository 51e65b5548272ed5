//! Platform abstraction layer
//!
//! Handles the terminal side of the game:
//! - Key and mouse events → intents
//! - Frame pacing against a monotonic clock
//! - Raw mode / alternate screen lifecycle

pub mod input;
pub mod terminal;
pub mod time;

pub use input::{InputAdapter, intent_for_key, intent_for_mouse};
pub use terminal::TerminalGuard;
pub use time::FrameClock;
