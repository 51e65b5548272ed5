//! Terminal rendering module
//!
//! The playfield is rasterised onto a character-cell canvas and presented
//! with crossterm. Rendering never mutates game state.

pub mod canvas;
pub mod scene;
pub mod shapes;
pub mod sprites;

use std::io::{self, Write};

pub use canvas::{Canvas, Cell};
pub use scene::Palette;
pub use sprites::{Sprite, SpriteSet};

use crate::settings::Settings;
use crate::sim::GameState;
use crate::tuning::Variant;

/// Anything that can show a frame
pub trait Renderer {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
    sprites: SpriteSet,
    palette: Palette,
    show_fps: bool,
    fps: Option<u32>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, size: (u16, u16), settings: &Settings, variant: Variant) -> Self {
        let field = settings.tuning_for(variant).field;
        Self {
            out,
            canvas: Canvas::new(size.0, size.1, field),
            sprites: SpriteSet::load(&settings.assets_dir, variant),
            palette: Palette::new(settings.high_contrast),
            show_fps: settings.show_fps,
            fps: None,
        }
    }

    /// Follow a terminal resize
    pub fn resize(&mut self, size: (u16, u16)) {
        if size != (self.canvas.cols(), self.canvas.rows()) {
            log::debug!("Resize to {}x{}", size.0, size.1);
            self.canvas.resize(size.0, size.1);
        }
    }

    /// Latest measured frame rate, shown when enabled in settings
    pub fn set_fps(&mut self, fps: Option<u32>) {
        self.fps = fps;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        let fps = if self.show_fps { self.fps } else { None };
        scene::paint(&mut self.canvas, state, &self.sprites, &self.palette, fps);
        self.canvas.present(&mut self.out)
    }
}
