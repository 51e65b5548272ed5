//! Optional ASCII-art sprites
//!
//! Looked up as `<assets_dir>/<variant>-player.txt` and
//! `<assets_dir>/<variant>-obstacle.txt`. A missing or empty file is not an
//! error; the scene falls back to plain shapes.

use std::io;
use std::path::Path;

use crossterm::style::Color;

use super::canvas::Canvas;
use crate::sim::Rect;
use crate::tuning::Variant;

/// Block of characters; spaces are transparent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    /// Parse sprite text, ignoring trailing blank lines. None if nothing is drawn.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        while rows.last().is_some_and(|r| r.iter().all(|c| c.is_whitespace())) {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        Some(Self { rows, width })
    }

    /// Read a sprite file; Ok(None) when the file does not exist
    pub fn load(path: &Path) -> io::Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Stretch the sprite over the cells `rect` covers
    pub fn stamp(&self, canvas: &mut Canvas, rect: &Rect, fg: Color) {
        let scale = canvas.scale();
        let max = rect.max();
        let (c0, c1) = Canvas::span(rect.min.x, max.x, scale.x);
        let (r0, r1) = Canvas::span(rect.min.y, max.y, scale.y);
        let cols = (c1 - c0).max(1);
        let rows = (r1 - r0).max(1);
        for row in 0..rows {
            let sy = row as usize * self.height() / rows as usize;
            for col in 0..cols {
                let sx = col as usize * self.width / cols as usize;
                let ch = self.rows[sy].get(sx).copied().unwrap_or(' ');
                if ch != ' ' {
                    canvas.put(c0 + col, r0 + row, ch, fg);
                }
            }
        }
    }
}

/// Sprites for one game
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    pub player: Option<Sprite>,
    pub obstacle: Option<Sprite>,
}

impl SpriteSet {
    pub fn load(dir: &Path, variant: Variant) -> Self {
        let load = |what: &str| {
            let path = dir.join(format!("{}-{}.txt", variant.slug(), what));
            match Sprite::load(&path) {
                Ok(Some(sprite)) => {
                    log::info!("Loaded {} sprite from {}", what, path.display());
                    Some(sprite)
                }
                Ok(None) => {
                    log::info!("No {} sprite at {}, drawing shapes", what, path.display());
                    None
                }
                Err(e) => {
                    log::warn!("Could not read {}: {}", path.display(), e);
                    None
                }
            }
        };
        Self {
            player: load("player"),
            obstacle: load("obstacle"),
        }
    }
}
