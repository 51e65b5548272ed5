//! Character-cell framebuffer
//!
//! The playfield is laid out in field units (800×600 by default) and
//! sampled onto however many cells the terminal has. A cell is "inside" a
//! shape when its centre is.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Color::Black,
    };
}

#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    /// Field units covered by the canvas
    field: Vec2,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, field: Vec2) -> Self {
        Self {
            cols,
            rows,
            field,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols as usize * rows as usize];
    }

    /// Fill every cell with `bg`
    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell { bg, ..Cell::BLANK });
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Paint a cell's background, clearing its glyph
    pub fn set_bg(&mut self, col: i32, row: i32, bg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { ch: ' ', fg: bg, bg };
        }
    }

    /// Draw a glyph over the existing background
    pub fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i].ch = ch;
            self.cells[i].fg = fg;
        }
    }

    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    pub fn text_centered(&mut self, row: i32, text: &str, fg: Color) {
        let len = text.chars().count() as i32;
        self.text((self.cols as i32 - len) / 2, row, text, fg);
    }

    /// Cells per field unit on each axis
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.field.x,
            self.rows as f32 / self.field.y,
        )
    }

    /// Cell containing a field-space point
    pub fn cell_at(&self, p: Vec2) -> (i32, i32) {
        let c = p * self.scale();
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    /// Field-space centre of a cell
    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + 0.5) / self.scale()
    }

    /// Half-open cell span whose centres fall in `[lo, hi)` along one axis
    pub(crate) fn span(lo: f32, hi: f32, scale: f32) -> (i32, i32) {
        ((lo * scale - 0.5).ceil() as i32, (hi * scale - 0.5).ceil() as i32)
    }

    /// One row as plain text
    pub fn row_string(&self, row: u16) -> String {
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Queue the whole canvas to `out` and flush
    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut colors: Option<(Color, Color)> = None;
            let mut run = String::new();
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if colors != Some((cell.fg, cell.bg)) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    colors = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}
