//! Rasterising 2D primitives onto the cell canvas
//!
//! All geometry is in screen-space field units (camera already applied).
//! Shapes smaller than a cell still light the cell holding their centre so
//! nothing on the playfield ever disappears.

use crossterm::style::Color;
use glam::Vec2;

use super::canvas::Canvas;
use crate::sim::Rect;

/// Cells a rect covers, as half-open column and row spans
fn cell_spans(canvas: &Canvas, rect: &Rect) -> ((i32, i32), (i32, i32)) {
    let scale = canvas.scale();
    let max = rect.max();
    (
        Canvas::span(rect.min.x, max.x, scale.x),
        Canvas::span(rect.min.y, max.y, scale.y),
    )
}

/// Fill cells whose centres satisfy `inside`; returns cells painted
fn fill_where(
    canvas: &mut Canvas,
    bounds: &Rect,
    bg: Color,
    inside: impl Fn(Vec2) -> bool,
) -> usize {
    if bounds.is_empty() {
        return 0;
    }
    let ((c0, c1), (r0, r1)) = cell_spans(canvas, bounds);
    let mut painted = 0;
    for row in r0.max(0)..r1.min(canvas.rows() as i32) {
        for col in c0.max(0)..c1.min(canvas.cols() as i32) {
            if inside(canvas.cell_center(col, row)) {
                canvas.set_bg(col, row, bg);
                painted += 1;
            }
        }
    }
    if painted == 0 {
        let (col, row) = canvas.cell_at(bounds.center());
        if canvas.get(col, row).is_some() {
            canvas.set_bg(col, row, bg);
            painted = 1;
        }
    }
    painted
}

pub fn fill_rect(canvas: &mut Canvas, rect: &Rect, bg: Color) -> usize {
    fill_where(canvas, rect, bg, |_| true)
}

/// Ellipse inscribed in `rect`
pub fn fill_ellipse(canvas: &mut Canvas, rect: &Rect, bg: Color) -> usize {
    let c = rect.center();
    let r = rect.size / 2.0;
    fill_where(canvas, rect, bg, |p| {
        let d = (p - c) / r;
        d.length_squared() <= 1.0
    })
}

/// Triangle given by three corners, any winding
pub fn fill_triangle(canvas: &mut Canvas, corners: [Vec2; 3], bg: Color) -> usize {
    let [a, b, c] = corners;
    let min = a.min(b).min(c);
    let max = a.max(b).max(c);
    let bounds = Rect::from_min_size(min, max - min);

    let edge = |p: Vec2, q: Vec2, r: Vec2| (q - p).perp_dot(r - p);
    fill_where(canvas, &bounds, bg, |p| {
        let d0 = edge(a, b, p);
        let d1 = edge(b, c, p);
        let d2 = edge(c, a, p);
        let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
        let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
        !(has_neg && has_pos)
    })
}

/// Glyph at the cell holding `p`
pub fn plot(canvas: &mut Canvas, p: Vec2, ch: char, fg: Color) {
    let (col, row) = canvas.cell_at(p);
    canvas.put(col, row, ch, fg);
}

/// Vertical dashed line at field x; `phase` scrolls the dash pattern
pub fn dashed_vline(canvas: &mut Canvas, x: f32, phase: f32, dash: f32, fg: Color) {
    let (col, _) = canvas.cell_at(Vec2::new(x, 0.0));
    for row in 0..canvas.rows() as i32 {
        let y = canvas.cell_center(col, row).y + phase;
        if y.rem_euclid(dash * 2.0) < dash {
            canvas.put(col, row, '┆', fg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        // 10 field units per cell on both axes
        Canvas::new(80, 60, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_rect_covers_expected_cells() {
        let mut c = canvas();
        let painted = fill_rect(&mut c, &Rect::new(100.0, 200.0, 50.0, 80.0), Color::Red);
        assert_eq!(painted, 5 * 8);
        assert_eq!(c.get(10, 20).map(|cell| cell.bg), Some(Color::Red));
        assert_eq!(c.get(15, 20).map(|cell| cell.bg), Some(Color::Black));
    }

    #[test]
    fn test_tiny_shape_still_visible() {
        let mut c = canvas();
        let painted = fill_rect(&mut c, &Rect::new(101.0, 101.0, 2.0, 2.0), Color::Yellow);
        assert_eq!(painted, 1);
        assert_eq!(c.get(10, 10).map(|cell| cell.bg), Some(Color::Yellow));
    }

    #[test]
    fn test_empty_rect_paints_nothing() {
        let mut c = canvas();
        assert_eq!(fill_rect(&mut c, &Rect::new(100.0, 100.0, 0.0, 40.0), Color::Red), 0);
    }

    #[test]
    fn test_offscreen_rect_is_clipped() {
        let mut c = canvas();
        assert_eq!(fill_rect(&mut c, &Rect::new(-200.0, -200.0, 50.0, 50.0), Color::Red), 0);
        let painted = fill_rect(&mut c, &Rect::new(780.0, 0.0, 100.0, 10.0), Color::Red);
        assert_eq!(painted, 2);
    }

    #[test]
    fn test_ellipse_is_smaller_than_its_box() {
        let mut a = canvas();
        let mut b = canvas();
        let rect = Rect::new(100.0, 100.0, 100.0, 100.0);
        let ellipse = fill_ellipse(&mut a, &rect, Color::Yellow);
        let boxed = fill_rect(&mut b, &rect, Color::Yellow);
        assert!(ellipse > 0 && ellipse < boxed);
        // Centre lit, corner not
        assert_eq!(a.get(15, 15).map(|cell| cell.bg), Some(Color::Yellow));
        assert_eq!(a.get(10, 10).map(|cell| cell.bg), Some(Color::Black));
    }

    #[test]
    fn test_triangle_winding_does_not_matter() {
        let corners = [
            Vec2::new(200.0, 100.0),
            Vec2::new(100.0, 300.0),
            Vec2::new(300.0, 300.0),
        ];
        let mut a = canvas();
        let mut b = canvas();
        let cw = fill_triangle(&mut a, corners, Color::Red);
        let ccw = fill_triangle(&mut b, [corners[0], corners[2], corners[1]], Color::Red);
        assert_eq!(cw, ccw);
        assert!(cw > 0);
    }
}
