//! Fixed timestep simulation tick
//!
//! The phase state machine plus the per-tick world step. Deterministic for a
//! given seed and input sequence.

use glam::Vec2;

use super::collision;
use super::entity::{Obstacle, Particle, Steer};
use super::spawn::sweep;
use super::state::{CrashCause, GameEvent, GamePhase, GameState, World};
use crate::consts::MAX_PARTICLES;
use crate::tuning::{DecorPolicy, Physics, ScoringPolicy, Tuning};

/// Particles puff out a little behind the flyer's centre
const PARTICLE_TRAIL_OFFSET: Vec2 = Vec2::new(-10.0, 0.0);

/// A discrete, debounced player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Quit,
    MoveLeft,
    MoveRight,
    Flap,
    PauseToggle,
    Start,
    Restart,
    /// Audio only; never reaches the simulation
    ToggleMute,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    pub start: bool,
    pub restart: bool,
}

impl TickInput {
    /// Fold a frame's intents into one tick's input. `Quit` and
    /// `ToggleMute` are the frame loop's business and are ignored here.
    pub fn from_intents(intents: &[Intent]) -> Self {
        let mut input = Self::default();
        for intent in intents {
            match intent {
                Intent::MoveLeft => input.move_left = true,
                Intent::MoveRight => input.move_right = true,
                Intent::Flap => input.flap = true,
                Intent::PauseToggle => input.pause = true,
                Intent::Start => input.start = true,
                Intent::Restart => input.restart = true,
                Intent::Quit | Intent::ToggleMute => {}
            }
        }
        input
    }

    /// Carry presses that have not reached a tick yet
    pub fn merge(&mut self, other: &TickInput) {
        self.move_left |= other.move_left;
        self.move_right |= other.move_right;
        self.flap |= other.flap;
        self.pause |= other.pause;
        self.start |= other.start;
        self.restart |= other.restart;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Phase transitions consume the tick they happen on
    if transition(state, input) {
        return;
    }

    match state.phase {
        GamePhase::Playing => step_playing(state, input),
        GamePhase::GameOver => {
            // Let the trail fade out behind the wreck
            advance_particles(&mut state.world);
        }
        GamePhase::Menu | GamePhase::Paused => {}
    }

    if state.phase != GamePhase::Playing && state.tuning.decor == DecorPolicy::AlwaysAnimate {
        advance_clouds(&mut state.world, state.tuning.field.x);
    }
}

/// Apply input-driven phase changes. Returns true if the phase changed.
fn transition(state: &mut GameState, input: &TickInput) -> bool {
    let next = match state.phase {
        GamePhase::Menu if input.start => {
            state.events.push(GameEvent::Started);
            GamePhase::Playing
        }
        GamePhase::Playing if input.pause => {
            state.events.push(GameEvent::Paused);
            GamePhase::Paused
        }
        GamePhase::Paused if input.pause => {
            state.events.push(GameEvent::Resumed);
            GamePhase::Playing
        }
        GamePhase::GameOver if input.restart => {
            restart(state);
            GamePhase::Playing
        }
        _ => return false,
    };
    log::info!("Phase {:?} -> {:?}", state.phase, next);
    state.phase = next;
    true
}

/// Throw the finished world away and start a new run
fn restart(state: &mut GameState) {
    state.high_scores.ratchet(state.world.score);
    state.rebuild_world();
    state.events.push(GameEvent::Restarted);
}

/// One tick of live gameplay
fn step_playing(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let world = &mut state.world;
    let events = &mut state.events;

    world.time_ticks += 1;

    // Player control
    match &tuning.physics {
        Physics::Driving(d) => {
            let steer = match (input.move_left, input.move_right) {
                (true, false) => Some(Steer::Left),
                (false, true) => Some(Steer::Right),
                _ => None,
            };
            if let Some(dir) = steer
                && world.player.steer(dir, d, tuning.field.x)
                && let Some(lane) = world.player.lane
            {
                events.push(GameEvent::LaneChanged { lane });
            }
        }
        Physics::Flying(f) => {
            if input.flap {
                world.player.flap(f.jump_impulse);
                events.push(GameEvent::Flapped);
            }
        }
    }

    // Integrate
    world.player.update(&tuning.physics, tuning.field);
    for obstacle in &mut world.obstacles {
        obstacle.update();
    }
    world.distance += match &tuning.physics {
        Physics::Driving(d) => d.scroll_speed,
        Physics::Flying(f) => f.pipe_speed,
    };
    world.camera.follow(world.player.center());

    // Drop obstacles that scrolled out before anything else looks at them
    let camera = &world.camera;
    let removed = sweep(&mut world.obstacles, |o| o.is_off_screen(camera));
    if removed > 0 {
        log::trace!("Swept {} obstacles", removed);
    }

    if world.spawner.poll(world.time_ticks, &mut world.rng) {
        let obstacle = spawn_obstacle(world, tuning);
        log::debug!("Spawned obstacle at {:?} (tick {})", obstacle.pos, world.time_ticks);
        world.obstacles.push(obstacle);
    }

    update_score(world, tuning, events);

    if let Physics::Flying(f) = &tuning.physics
        && f.particle_interval > 0
        && world.time_ticks % f.particle_interval == 0
        && world.particles.len() < MAX_PARTICLES
    {
        let at = world.player.center() + PARTICLE_TRAIL_OFFSET;
        let particle = Particle::spawn(at, f.particle_life, &mut world.decor_rng);
        world.particles.push(particle);
    }
    advance_particles(world);
    advance_clouds(world, tuning.field.x);

    let crash = if !world.player.alive {
        Some(CrashCause::Ground)
    } else if collision::detect(&world.player, &world.obstacles) {
        Some(CrashCause::Obstacle)
    } else {
        None
    };
    if let Some(cause) = crash {
        end_run(state, cause);
    }
}

/// Build the next obstacle just outside the leading edge of the view
fn spawn_obstacle(world: &mut World, tuning: &Tuning) -> Obstacle {
    use rand::Rng;

    let field = tuning.field;
    match &tuning.physics {
        Physics::Driving(d) => {
            let lane = world.rng.random_range(0..d.lane_count.max(1));
            let top = world.camera.offset - d.obstacle_size.y;
            Obstacle::cone(lane, top, d, field.x)
        }
        Physics::Flying(f) => {
            let lo = f.gap_margin;
            let hi = (f.floor_y(field.y) - f.gap_margin).max(lo);
            let gap_center = world.rng.random_range(lo..=hi).round();
            Obstacle::pipe(field.x, gap_center, f, field)
        }
    }
}

fn update_score(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    match tuning.scoring {
        ScoringPolicy::PerTick => world.score += 1,
        ScoringPolicy::PerObstaclePassed => {
            let axis = world.camera.axis;
            for obstacle in &mut world.obstacles {
                if !obstacle.passed && obstacle.is_behind(&world.player, axis) {
                    obstacle.passed = true;
                    world.score += 1;
                    events.push(GameEvent::ObstaclePassed);
                }
            }
        }
    }
}

fn advance_particles(world: &mut World) {
    for particle in &mut world.particles {
        particle.update();
    }
    sweep(&mut world.particles, |p| p.is_dead());
}

fn advance_clouds(world: &mut World, field_width: f32) {
    for cloud in &mut world.clouds {
        cloud.update(field_width, &mut world.decor_rng);
    }
}

/// Crash: freeze the run, fire one-shot side effects, ratchet the high score
fn end_run(state: &mut GameState, cause: CrashCause) {
    let world = &mut state.world;
    world.player.alive = false;
    if !world.collision_handled {
        world.collision_handled = true;
        state.events.push(GameEvent::Crashed { cause });
    }

    let score = world.score;
    let new_high = score > state.high_scores.best();
    let rank = state
        .high_scores
        .record_run(score, world.time_ticks, state.restarts);
    state.events.push(GameEvent::GameOver { score, new_high });
    state.phase = GamePhase::GameOver;

    log::info!(
        "Run over ({:?}): score {}, best {}, rank {:?}",
        cause,
        score,
        state.high_scores.best(),
        rank
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SpawnGate;
    use crate::sim::entity::ObstacleShape;
    use proptest::prelude::*;

    fn press(intent: Intent) -> TickInput {
        TickInput::from_intents(&[intent])
    }

    fn playing(tuning: Tuning, seed: u64) -> GameState {
        let mut state = GameState::new(tuning, seed);
        tick(&mut state, &press(Intent::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Lane racer that never spawns on its own
    fn quiet_road() -> Tuning {
        Tuning {
            spawn: SpawnGate::Chance { probability: 0.0 },
            ..Tuning::lane_racer()
        }
    }

    fn block(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            vel: Vec2::new(0.0, 3.0),
            lane: None,
            passed: false,
            shape: ObstacleShape::Block,
        }
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut state = GameState::new(Tuning::rara_avis(), 12345);

        // Tick without start - should stay in Menu, world untouched
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.world.time_ticks, 0);

        // Flap is not a start
        tick(&mut state, &press(Intent::Flap));
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &press(Intent::Start));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_flap_ignored_outside_playing() {
        let mut state = GameState::new(Tuning::rara_avis(), 1);
        let before = state.world.player.clone();
        tick(&mut state, &press(Intent::Flap));
        assert_eq!(state.world.player, before);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = playing(Tuning::rara_avis(), 1);
        tick(&mut state, &press(Intent::Restart));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.restarts, 0);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = playing(quiet_road(), 7);
        state.world.player.pos = Vec2::new(100.0, 100.0);
        state.world.player.size = Vec2::new(50.0, 80.0);
        state.world.obstacles.push(block(100.0, 100.0, 40.0, 60.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.world.player.alive);
        assert!(state.events.contains(&GameEvent::Crashed {
            cause: CrashCause::Obstacle
        }));
    }

    #[test]
    fn test_no_collision_keeps_playing() {
        let mut state = playing(quiet_road(), 7);
        state.world.player.pos = Vec2::new(0.0, 300.0);
        state.world.player.size = Vec2::new(50.0, 80.0);
        state.world.obstacles.push(block(500.0, 300.0, 50.0, 60.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.world.player.alive);
        assert_eq!(state.world.obstacles.len(), 1);
    }

    #[test]
    fn test_crash_side_effects_fire_once() {
        let mut state = playing(quiet_road(), 7);
        state.world.obstacles.push(block(0.0, 0.0, 800.0, 600.0));
        tick(&mut state, &TickInput::default());
        assert!(state.world.collision_handled);

        // Still overlapping on the game-over screen: nothing new fires
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            assert!(state.events.is_empty());
        }
        assert_eq!(state.high_scores.entries.len(), 1);
    }

    #[test]
    fn test_restart_scenario() {
        let mut state = playing(Tuning::rara_avis(), 3);
        state.phase = GamePhase::GameOver;
        state.world.score = 7;
        state.high_scores.ratchet(5);
        state
            .world
            .particles
            .push(Particle::spawn(Vec2::ZERO, 30, &mut state.world.decor_rng));
        state.world.obstacles.push(block(300.0, 0.0, 80.0, 600.0));

        tick(&mut state, &press(Intent::Restart));

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 7);
        assert!(state.world.obstacles.is_empty());
        assert!(state.world.particles.is_empty());
        assert_eq!(state.events, vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = playing(quiet_road(), 9);
        state.world.obstacles.push(block(113.0, 50.0, 40.0, 60.0));

        tick(&mut state, &press(Intent::PauseToggle));
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen_obstacle = state.world.obstacles[0].pos;
        let frozen_player = state.world.player.pos;
        let frozen_score = state.score();

        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.world.obstacles[0].pos, frozen_obstacle);
        assert_eq!(state.world.player.pos, frozen_player);
        assert_eq!(state.score(), frozen_score);

        tick(&mut state, &press(Intent::PauseToggle));
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.world.obstacles[0].pos, frozen_obstacle + Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_paused_clouds_follow_decor_policy() {
        let mut frozen = playing(Tuning::rara_avis(), 4);
        tick(&mut frozen, &press(Intent::PauseToggle));
        let before = frozen.world.clouds.clone();
        tick(&mut frozen, &TickInput::default());
        assert_eq!(frozen.world.clouds, before);

        let mut drifting = playing(Tuning::flippy_block(), 4);
        tick(&mut drifting, &press(Intent::PauseToggle));
        let before = drifting.world.clouds.clone();
        tick(&mut drifting, &TickInput::default());
        assert_ne!(drifting.world.clouds, before);
    }

    #[test]
    fn test_per_tick_scoring_on_the_road() {
        let mut state = playing(quiet_road(), 2);
        for _ in 0..25 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score(), 25);
    }

    #[test]
    fn test_passing_a_pipe_scores_once() {
        let mut state = playing(Tuning::rara_avis(), 2);
        let f = state.tuning.flying().unwrap().clone();
        // Pipe already mostly past the bird, gap wide open around it
        state.world.obstacles.push(Obstacle::pipe(
            20.0 - f.pipe_width,
            state.world.player.center().y,
            &f,
            state.tuning.field,
        ));
        state.world.spawner.last_spawn_tick = Some(0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), 1);
        assert!(state.events.contains(&GameEvent::ObstaclePassed));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_flying_spawns_on_interval() {
        let mut state = playing(Tuning::rara_avis(), 11);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.world.obstacles.len(), 1);

        let pipe = &state.world.obstacles[0];
        assert_eq!(pipe.pos.x, 800.0);
        if let ObstacleShape::Pipe { gap_top, gap_bottom } = pipe.shape {
            let center = (gap_top + gap_bottom) / 2.0;
            assert!((150.0..=350.0).contains(&center));
        } else {
            panic!("flying variant spawned a non-pipe");
        }

        // Keep the bird aloft until the next pipe is due
        for t in 0..108 {
            let input = TickInput {
                flap: t % 20 == 0,
                ..Default::default()
            };
            tick(&mut state, &input);
        }
        assert_eq!(state.world.obstacles.len(), 1);
        tick(&mut state, &press(Intent::Flap));
        assert_eq!(state.world.obstacles.len(), 2);
    }

    #[test]
    fn test_falling_bird_hits_ground() {
        let mut state = playing(Tuning::rara_avis(), 5);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::Crashed {
            cause: CrashCause::Ground
        }));
    }

    #[test]
    fn test_lane_change_events() {
        let mut state = playing(quiet_road(), 1);
        tick(&mut state, &press(Intent::MoveLeft));
        assert_eq!(state.events, vec![GameEvent::LaneChanged { lane: 0 }]);
        tick(&mut state, &press(Intent::MoveLeft));
        assert!(state.events.is_empty());
        assert_eq!(state.world.player.lane, Some(0));
    }

    #[test]
    fn test_road_camera_keeps_car_centred() {
        let mut state = playing(quiet_road(), 1);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        let screen = state.world.player_screen_pos();
        let centre = screen.y + state.world.player.size.y / 2.0;
        assert!((centre - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_cones_spawn_above_view_and_get_swept() {
        let tuning = Tuning {
            spawn: SpawnGate::Chance { probability: 1.0 },
            ..Tuning::lane_racer()
        };
        let mut state = playing(tuning, 21);
        tick(&mut state, &TickInput::default());
        let cone = &state.world.obstacles[0];
        assert_eq!(cone.pos.y, state.world.camera.offset - 60.0);

        // Whatever is live is never past the trailing edge
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
            if state.phase != GamePhase::Playing {
                break;
            }
            let (_, bottom) = state.world.camera.visible_range();
            assert!(state.world.obstacles.iter().all(|o| o.pos.y <= bottom));
        }
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let inputs: Vec<TickInput> = (0..600)
            .map(|t| TickInput {
                flap: t % 17 == 0,
                move_left: t % 40 == 5,
                move_right: t % 40 == 25,
                ..Default::default()
            })
            .collect();

        for tuning in [Tuning::lane_racer(), Tuning::rara_avis(), Tuning::flippy_block()] {
            let mut state1 = playing(tuning.clone(), 99999);
            let mut state2 = playing(tuning, 99999);
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
                assert_eq!(state1.world.player, state2.world.player);
                assert_eq!(state1.world.obstacles, state2.world.obstacles);
                assert_eq!(state1.score(), state2.score());
                assert_eq!(state1.phase, state2.phase);
            }
        }
    }

    fn intent_strategy() -> impl Strategy<Value = Intent> {
        prop_oneof![
            Just(Intent::MoveLeft),
            Just(Intent::MoveRight),
            Just(Intent::Flap),
            Just(Intent::PauseToggle),
            Just(Intent::Start),
            Just(Intent::Restart),
        ]
    }

    proptest! {
        #[test]
        fn high_score_never_decreases(
            seed in any::<u64>(),
            frames in proptest::collection::vec(proptest::option::of(intent_strategy()), 1..600),
        ) {
            let mut state = GameState::new(Tuning::lane_racer(), seed);
            let mut best = state.high_score();
            for intent in frames {
                let input = intent.map(press).unwrap_or_default();
                tick(&mut state, &input);
                prop_assert!(state.high_score() >= best);
                best = state.high_score();
                if state.phase == GamePhase::GameOver {
                    prop_assert!(state.high_score() >= state.score());
                }
            }
        }

        #[test]
        fn flyer_stays_in_bounds_through_ticks(
            seed in any::<u64>(),
            flaps in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut state = playing(Tuning::rara_avis(), seed);
            let floor = state.tuning.flying().unwrap().floor_y(600.0);
            for flap in flaps {
                tick(&mut state, &TickInput { flap, ..Default::default() });
                let p = &state.world.player;
                prop_assert!(p.pos.y >= 0.0);
                prop_assert!(p.pos.y + p.size.y <= floor);
            }
        }

        #[test]
        fn lane_stays_in_range(moves in proptest::collection::vec(any::<bool>(), 1..100)) {
            let mut state = playing(quiet_road(), 0);
            for left in moves {
                let input = if left { press(Intent::MoveLeft) } else { press(Intent::MoveRight) };
                tick(&mut state, &input);
                let lane = state.world.player.lane.unwrap();
                prop_assert!(lane < 3);
            }
        }
    }
}
