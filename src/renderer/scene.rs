//! Painting a `GameState` onto the canvas
//!
//! Read-only with respect to the game: everything here takes `&GameState`.
//! Layer order is background, obstacles, particles, player, HUD, overlay.

use crossterm::style::Color;
use glam::Vec2;

use super::canvas::Canvas;
use super::shapes::{dashed_vline, fill_ellipse, fill_rect, fill_triangle, plot};
use super::sprites::SpriteSet;
use crate::sim::{Camera, GamePhase, GameState, Obstacle, ObstacleShape, Player, Rect, World};
use crate::tuning::{DrivingTuning, FlyingTuning, Physics};

/// Smallest terminal the playfield is drawn in
pub const MIN_COLS: u16 = 32;
pub const MIN_ROWS: u16 = 12;

/// Leaderboard rows shown after a crash
const LEADERBOARD_ROWS: usize = 5;

/// Lane divider dash length in field units
const LANE_DASH: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: [Color; 3],
    pub sun: Color,
    pub cloud: Color,
    pub pipe: Color,
    pub pipe_lip: Color,
    pub ground: Color,
    pub grass: Color,
    pub road: Color,
    pub lane_mark: Color,
    pub car: Color,
    pub car_window: Color,
    pub cone: Color,
    pub cone_stripe: Color,
    pub bird: Color,
    pub block: Color,
    pub eye: Color,
    pub particle: Color,
    pub text: Color,
    pub accent: Color,
    pub danger: Color,
    pub panel: Color,
}

impl Palette {
    pub fn standard() -> Self {
        Self {
            sky: [Color::DarkBlue, Color::Blue, Color::DarkCyan],
            sun: Color::Yellow,
            cloud: Color::White,
            pipe: Color::Green,
            pipe_lip: Color::DarkGreen,
            ground: Color::DarkYellow,
            grass: Color::DarkGreen,
            road: Color::DarkGrey,
            lane_mark: Color::Grey,
            car: Color::Blue,
            car_window: Color::Cyan,
            cone: Color::DarkYellow,
            cone_stripe: Color::White,
            bird: Color::Yellow,
            block: Color::Magenta,
            eye: Color::Black,
            particle: Color::Yellow,
            text: Color::White,
            accent: Color::Yellow,
            danger: Color::Red,
            panel: Color::Black,
        }
    }

    /// White shapes on black, nothing else
    pub fn high_contrast() -> Self {
        Self {
            sky: [Color::Black; 3],
            sun: Color::Black,
            cloud: Color::Black,
            pipe: Color::White,
            pipe_lip: Color::White,
            ground: Color::Grey,
            grass: Color::Grey,
            road: Color::Black,
            lane_mark: Color::White,
            car: Color::White,
            car_window: Color::White,
            cone: Color::Grey,
            cone_stripe: Color::Grey,
            bird: Color::White,
            block: Color::White,
            eye: Color::Black,
            particle: Color::White,
            text: Color::White,
            accent: Color::White,
            danger: Color::White,
            panel: Color::Black,
        }
    }

    pub fn new(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::standard()
        }
    }
}

/// Draw one frame of `state`
pub fn paint(
    canvas: &mut Canvas,
    state: &GameState,
    sprites: &SpriteSet,
    palette: &Palette,
    fps: Option<u32>,
) {
    if canvas.cols() < MIN_COLS || canvas.rows() < MIN_ROWS {
        canvas.clear(Color::Black);
        canvas.text_centered(canvas.rows() as i32 / 2, "Terminal too small", Color::White);
        return;
    }

    let field = state.tuning.field;
    match &state.tuning.physics {
        Physics::Driving(d) => paint_road(canvas, &state.world, d, field, sprites, palette),
        Physics::Flying(f) => paint_sky(canvas, &state.world, f, field, sprites, palette),
    }

    paint_hud(canvas, state, palette, fps);

    match state.phase {
        GamePhase::Menu => paint_menu(canvas, state, palette),
        GamePhase::Paused => panel(
            canvas,
            &[
                ("PAUSED".to_string(), palette.accent),
                (String::new(), palette.text),
                ("Press P to continue".to_string(), palette.text),
            ],
            palette,
        ),
        GamePhase::GameOver => paint_game_over(canvas, state, palette),
        GamePhase::Playing => {}
    }
}

/// Rect of an entity in screen space
fn on_screen(camera: &Camera, pos: Vec2, size: Vec2) -> Rect {
    Rect::from_min_size(camera.point_to_screen(pos), size)
}

// ── Driving ──────────────────────────────────────────────────────────────────

fn paint_road(
    canvas: &mut Canvas,
    world: &World,
    tuning: &DrivingTuning,
    field: Vec2,
    sprites: &SpriteSet,
    palette: &Palette,
) {
    canvas.clear(palette.road);

    let lane_width = tuning.lane_width(field.x);
    for lane in 1..tuning.lane_count {
        dashed_vline(
            canvas,
            lane as f32 * lane_width,
            world.camera.offset,
            LANE_DASH,
            palette.lane_mark,
        );
    }

    for obstacle in &world.obstacles {
        let rect = on_screen(&world.camera, obstacle.pos, obstacle.size);
        match &sprites.obstacle {
            Some(sprite) => sprite.stamp(canvas, &rect, palette.cone),
            None => paint_cone(canvas, &rect, palette),
        }
    }

    let car = on_screen(&world.camera, world.player.pos, world.player.size);
    match &sprites.player {
        Some(sprite) => sprite.stamp(canvas, &car, palette.car),
        None => {
            fill_rect(canvas, &car, palette.car);
            let s = car.size;
            let windshield = Rect::new(car.min.x + s.x * 0.2, car.min.y + s.y * 0.15, s.x * 0.6, s.y * 0.15);
            fill_rect(canvas, &windshield, palette.car_window);
        }
    }
}

fn paint_cone(canvas: &mut Canvas, rect: &Rect, palette: &Palette) {
    let max = rect.max();
    fill_triangle(
        canvas,
        [
            Vec2::new(rect.center().x, rect.min.y),
            Vec2::new(rect.min.x, max.y),
            Vec2::new(max.x, max.y),
        ],
        palette.cone,
    );
    let s = rect.size;
    let stripe = Rect::new(rect.min.x + s.x * 0.3, rect.min.y + s.y * 0.5, s.x * 0.4, s.y * 0.12);
    fill_rect(canvas, &stripe, palette.cone_stripe);
}

// ── Flying ───────────────────────────────────────────────────────────────────

fn paint_sky(
    canvas: &mut Canvas,
    world: &World,
    tuning: &FlyingTuning,
    field: Vec2,
    sprites: &SpriteSet,
    palette: &Palette,
) {
    let bands = palette.sky.len() as i32;
    let rows = canvas.rows() as i32;
    for row in 0..rows {
        let band = palette.sky[(row * bands / rows.max(1)).min(bands - 1) as usize];
        for col in 0..canvas.cols() as i32 {
            canvas.set_bg(col, row, band);
        }
    }

    fill_ellipse(canvas, &Rect::new(field.x - 150.0, 30.0, 100.0, 100.0), palette.sun);

    for cloud in &world.clouds {
        let p = world.camera.point_to_screen(cloud.pos);
        for (dx, dy, r) in [(0.0, 0.0, 20.0), (15.0, -10.0, 15.0), (30.0, 0.0, 20.0), (15.0, 10.0, 15.0)] {
            let puff = Rect::new(p.x + dx - r, p.y + dy - r, r * 2.0, r * 2.0);
            fill_ellipse(canvas, &puff, palette.cloud);
        }
    }

    for obstacle in &world.obstacles {
        paint_pipe(canvas, obstacle, &world.camera, sprites, palette);
    }

    for particle in &world.particles {
        let glyph = match particle.fade() {
            f if f > 0.66 => '*',
            f if f > 0.33 => '+',
            _ => '.',
        };
        plot(canvas, world.camera.point_to_screen(particle.pos), glyph, palette.particle);
    }

    // Ground with a grass strip and hatching that scrolls with the pipes
    let floor = tuning.floor_y(field.y);
    fill_rect(canvas, &Rect::new(0.0, floor, field.x, tuning.ground_height), palette.ground);
    fill_rect(canvas, &Rect::new(0.0, floor, field.x, 20.0), palette.grass);
    let shift = world.distance.rem_euclid(40.0);
    let mut x = -shift;
    while x < field.x {
        plot(canvas, Vec2::new(x.max(0.0), floor + 40.0), '╱', palette.grass);
        x += 40.0;
    }

    paint_flyer(canvas, &world.player, &world.camera, tuning, sprites, palette);
}

fn paint_pipe(
    canvas: &mut Canvas,
    pipe: &Obstacle,
    camera: &Camera,
    sprites: &SpriteSet,
    palette: &Palette,
) {
    for hitbox in pipe.hitboxes() {
        let rect = on_screen(camera, hitbox.min, hitbox.size);
        match &sprites.obstacle {
            Some(sprite) => sprite.stamp(canvas, &rect, palette.pipe),
            None => {
                fill_rect(canvas, &rect, palette.pipe);
            }
        }
    }
    if let ObstacleShape::Pipe { gap_top, gap_bottom } = pipe.shape {
        let lip = |y: f32| on_screen(camera, Vec2::new(pipe.pos.x, y), Vec2::new(pipe.size.x, 20.0));
        fill_rect(canvas, &lip(gap_top - 20.0), palette.pipe_lip);
        fill_rect(canvas, &lip(gap_bottom), palette.pipe_lip);
    }
}

fn paint_flyer(
    canvas: &mut Canvas,
    player: &Player,
    camera: &Camera,
    tuning: &FlyingTuning,
    sprites: &SpriteSet,
    palette: &Palette,
) {
    let rect = on_screen(camera, player.pos, player.size);
    if let Some(sprite) = &sprites.player {
        sprite.stamp(canvas, &rect, palette.bird);
        return;
    }
    if tuning.round_player {
        fill_ellipse(canvas, &rect, palette.bird);
    } else {
        fill_rect(canvas, &rect, palette.block);
    }
    let eye = rect.center() + Vec2::new(rect.size.x * 0.25, -rect.size.y * 0.2);
    let glyph = if player.alive { '•' } else { 'x' };
    plot(canvas, eye, glyph, palette.eye);
}

// ── HUD and overlays ─────────────────────────────────────────────────────────

fn paint_hud(canvas: &mut Canvas, state: &GameState, palette: &Palette, fps: Option<u32>) {
    canvas.text(
        1,
        0,
        &format!("Score: {}  High Score: {}", state.score(), state.high_score()),
        palette.text,
    );

    let mut right = state.variant().title().to_string();
    if let Some(fps) = fps {
        right = format!("{} fps  {}", fps, right);
    }
    let col = canvas.cols() as i32 - right.chars().count() as i32 - 1;
    canvas.text(col, 0, &right, palette.accent);
}

fn paint_menu(canvas: &mut Canvas, state: &GameState, palette: &Palette) {
    let controls: [&str; 2] = if state.variant().is_flying() {
        ["SPACE or UP to flap", "Avoid pipes and don't hit the ground"]
    } else {
        ["LEFT / RIGHT to change lanes", "Dodge the cones"]
    };
    panel(
        canvas,
        &[
            (state.variant().title().to_string(), palette.accent),
            (String::new(), palette.text),
            (controls[0].to_string(), palette.text),
            (controls[1].to_string(), palette.text),
            ("P to pause, M to mute, Q to quit".to_string(), palette.text),
            (String::new(), palette.text),
            ("Press SPACE or click to start".to_string(), palette.text),
            (String::new(), palette.text),
            (format!("High Score: {}", state.high_score()), palette.accent),
        ],
        palette,
    );
}

fn paint_game_over(canvas: &mut Canvas, state: &GameState, palette: &Palette) {
    let mut lines = vec![
        ("GAME OVER".to_string(), palette.danger),
        (String::new(), palette.text),
        (format!("Score: {}", state.score()), palette.text),
        (format!("High Score: {}", state.high_score()), palette.text),
    ];

    let rank = state.high_scores.rank_of(state.restarts);
    if rank == Some(1) {
        lines.push(("NEW HIGH SCORE!".to_string(), palette.accent));
    }

    if !state.high_scores.is_empty() {
        lines.push((String::new(), palette.text));
        for (i, entry) in state.high_scores.entries.iter().take(LEADERBOARD_ROWS).enumerate() {
            let current = rank == Some(i + 1);
            let marker = if current { '>' } else { ' ' };
            lines.push((
                format!("{}{:>2}. {:>6}", marker, i + 1, entry.score),
                if current { palette.accent } else { palette.text },
            ));
        }
    }

    lines.push((String::new(), palette.text));
    lines.push(("SPACE or R to restart, Q to quit".to_string(), palette.text));
    panel(canvas, &lines, palette);
}

/// Centred box of text lines
fn panel(canvas: &mut Canvas, lines: &[(String, Color)], palette: &Palette) {
    let inner = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) as i32;
    let width = (inner + 4).min(canvas.cols() as i32);
    let height = (lines.len() as i32 + 2).min(canvas.rows() as i32);
    let left = (canvas.cols() as i32 - width) / 2;
    let top = (canvas.rows() as i32 - height) / 2;

    for row in top..top + height {
        for col in left..left + width {
            canvas.set_bg(col, row, palette.panel);
        }
    }
    for (i, (line, color)) in lines.iter().enumerate() {
        let row = top + 1 + i as i32;
        if row >= top + height - 1 {
            break;
        }
        canvas.text_centered(row, line, *color);
    }
}
