//! Application shell
//!
//! Owns the session and drives the frame loop:
//! poll input → tick → sound → draw → wait for the next frame.

use std::io;

use crate::audio::AudioManager;
use crate::platform::{FrameClock, InputAdapter, TerminalGuard};
use crate::renderer::{Renderer, TerminalRenderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Intent, TickInput, tick};
use crate::tuning::{Tuning, Variant};

/// Everything the frame loop needs, built once at startup
pub struct AppContext<R: Renderer> {
    pub settings: Settings,
    pub state: GameState,
    pub renderer: R,
    pub audio: AudioManager,
    /// Presses not yet consumed by a tick
    pending: TickInput,
}

impl<R: Renderer> AppContext<R> {
    pub fn new(settings: Settings, tuning: Tuning, seed: u64, renderer: R) -> Self {
        let audio = AudioManager::from_settings(&settings);
        Self {
            settings,
            state: GameState::new(tuning, seed),
            renderer,
            audio,
            pending: TickInput::default(),
        }
    }

    /// One frame: apply `intents`, run `ticks` simulation steps and draw.
    /// Returns false once the player asked to quit.
    pub fn frame(&mut self, intents: &[Intent], ticks: u32) -> io::Result<bool> {
        if intents.contains(&Intent::Quit) {
            log::info!("Quit requested");
            return Ok(false);
        }
        if intents.contains(&Intent::ToggleMute) {
            self.audio.set_muted(!self.audio.is_muted());
        }
        self.pending.merge(&TickInput::from_intents(intents));

        for _ in 0..ticks {
            let input = std::mem::take(&mut self.pending);
            tick(&mut self.state, &input);
            self.dispatch_events();
        }

        self.audio.set_ambient(self.state.phase == GamePhase::Playing);
        self.renderer.draw(&self.state)?;
        Ok(true)
    }

    fn dispatch_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::GameOver { score, new_high } => {
                    log::info!("Game over: score {} (new high: {})", score, new_high)
                }
                GameEvent::Restarted => log::info!("Restarted, seed {}", self.state.world.seed),
                _ => log::debug!("{:?}", event),
            }
        }
        self.audio.handle_events(&self.state.events);
    }
}

/// Play `variant` in the terminal until the player quits
pub fn run(variant: Variant) -> io::Result<()> {
    let settings = Settings::load();
    let tuning = settings.tuning_for(variant);
    let seed = settings.session_seed();
    log::info!("{} starting with seed {}", variant.title(), seed);

    let mut guard = TerminalGuard::enter()?;
    let renderer = TerminalRenderer::new(io::stdout(), TerminalGuard::size()?, &settings, variant);
    let mut app = AppContext::new(settings, tuning, seed, renderer);

    let result = frame_loop(&mut app);
    guard.restore()?;

    log::info!(
        "Session over after {} runs, high score {}",
        app.state.restarts + 1,
        app.state.high_score()
    );
    result
}

fn frame_loop(app: &mut AppContext<TerminalRenderer<io::Stdout>>) -> io::Result<()> {
    let mut input = InputAdapter::new();
    let mut clock = FrameClock::new(app.settings.target_fps);
    loop {
        let intents = input.poll(app.state.phase)?;
        let ticks = clock.advance();

        app.renderer.resize(TerminalGuard::size()?);
        app.renderer.set_fps(clock.fps());
        if !app.frame(&intents, ticks)? {
            return Ok(());
        }
        clock.wait();
    }
}
