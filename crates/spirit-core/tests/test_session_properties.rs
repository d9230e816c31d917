//! Integration tests for the flight-game session.
//!
//! Exercises: start → tick (input, obstacles, collectibles, score, ramp)
//! → game over → restart, through the public `GameSession` API.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spirit_core::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

fn running(config: GameConfig) -> GameSession {
    let mut session = GameSession::with_config(config).expect("valid config");
    session.start().expect("idle session starts");
    session
}

fn set_obstacle(session: &mut GameSession, id: u32, at: Vec3) {
    for (_, (o, pos)) in session.world.query_mut::<(&Obstacle, &mut Position)>() {
        if o.id == id {
            pos.0 = at;
        }
    }
}

fn set_collectible(session: &mut GameSession, id: u32, at: Vec3) {
    for (_, (c, pos)) in session
        .world
        .query_mut::<(&Collectible, &mut Position)>()
    {
        if c.id == id {
            pos.0 = at;
        }
    }
}

/// Park every obstacle in the far corner so nothing can hit the player soon.
fn park_obstacles(session: &mut GameSession) {
    for (_, (_, pos)) in session.world.query_mut::<(&Obstacle, &mut Position)>() {
        pos.0 = Vec3::new(4.9, 4.4, -45.0);
    }
}

fn park_collectibles(session: &mut GameSession) {
    for (_, (_, pos)) in session
        .world
        .query_mut::<(&Collectible, &mut Position)>()
    {
        pos.0 = Vec3::new(-4.9, 4.4, -45.0);
    }
}

fn collectible(session: &GameSession, id: u32) -> (Collectible, Vec3) {
    session
        .collectibles()
        .into_iter()
        .find(|(c, _)| c.id == id)
        .expect("collectible exists")
}

/// Obstacles barely move, so a session can run for minutes without a hit.
fn slow_obstacles(seed: u64) -> GameConfig {
    GameConfig {
        obstacle_speed: 0.001,
        ..GameConfig::seeded(seed)
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn parked_entities_leave_a_clear_sky() {
    let mut session = running(GameConfig::seeded(11));
    park_obstacles(&mut session);
    park_collectibles(&mut session);

    assert!(session
        .obstacles()
        .iter()
        .all(|(_, pos)| *pos == Vec3::new(4.9, 4.4, -45.0)));
    assert!(session
        .collectibles()
        .iter()
        .all(|(_, pos)| *pos == Vec3::new(-4.9, 4.4, -45.0)));

    let report = session.tick(0.1);
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(report.points, 0);
}

#[test]
fn collectible_at_distance_one_scores_on_first_tick() {
    let mut session = running(GameConfig::seeded(1));
    set_collectible(&mut session, 0, Vec3::new(0.0, 0.0, -1.0));

    let report = session.tick(0.1);

    assert_eq!(session.score(), 10);
    assert_eq!(report.points, 10);
    assert_eq!(report.collected, vec![0]);
    assert!(collectible(&session, 0).0.collected);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn passed_obstacle_recycles_far_and_play_continues() {
    let mut session = running(GameConfig::seeded(2));
    set_obstacle(&mut session, 0, Vec3::new(4.0, 4.0, 4.5));

    let report = session.tick(0.1);

    assert_eq!(report.obstacles_recycled, 1);
    assert_eq!(session.state(), SessionState::Running);
    let (_, pos) = session.obstacles()[0];
    assert_eq!(pos.z, -50.0);
    assert!((-5.0..5.0).contains(&pos.x));
    assert!((-0.5..4.5).contains(&pos.y));
}

#[test]
fn ten_second_boundary_spawns_exactly_one() {
    let mut session = running(slow_obstacles(3));
    assert_eq!(session.obstacle_count(), 5);

    assert_eq!(session.tick(9.95).obstacles_spawned, 0);
    assert_eq!(session.obstacle_count(), 5);

    assert_eq!(session.tick(0.1).obstacles_spawned, 1);
    assert_eq!(session.obstacle_count(), 6);

    // more ticks inside the same window never spawn again
    for _ in 0..5 {
        assert_eq!(session.tick(0.1).obstacles_spawned, 0);
    }
    assert_eq!(session.obstacle_count(), 6);
    assert_eq!(session.state(), SessionState::Running);

    let newest = session.obstacles().last().copied().expect("obstacles");
    assert_eq!(newest.0.id, 5);
}

#[test]
fn obstacle_ramp_stops_at_cap() {
    let mut session = running(slow_obstacles(4));
    for _ in 0..200 {
        session.tick(1.0);
        park_collectibles(&mut session);
    }
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.obstacle_count(), 10);
}

// ── Properties ─────────────────────────────────────────────────────────

#[test]
fn player_stays_in_bounds_under_any_input() {
    for seed in 0..20 {
        let mut session = running(GameConfig::seeded(seed));
        let mut rng = StdRng::seed_from_u64(1000 + seed);

        for _ in 0..600 {
            if session.state() != SessionState::Running {
                break;
            }
            let scale: f32 = if rng.gen_bool(0.1) { 1e6 } else { 200.0 };
            session.push_drag(
                rng.gen_range(-1.0f32..1.0) * scale,
                rng.gen_range(-1.0f32..1.0) * scale,
            );
            session.tick(1.0 / 60.0);

            let p = session.player();
            assert!((-5.0..=5.0).contains(&p.x), "seed {seed}: x = {}", p.x);
            assert!((0.0..=5.0).contains(&p.y), "seed {seed}: y = {}", p.y);
        }
    }
}

#[test]
fn collision_freezes_session_on_the_same_tick() {
    let mut session = running(GameConfig::seeded(5));
    set_obstacle(&mut session, 2, Vec3::new(0.0, 0.0, -1.2));
    // would score if the tick kept going
    set_collectible(&mut session, 0, Vec3::new(0.0, 0.0, -0.5));

    let report = session.tick(0.05);
    assert_eq!(report.collided_with, Some(2));
    assert_eq!(session.state(), SessionState::Over);
    assert_eq!(session.score(), 0);
    assert_eq!(report.points, 0);

    let obstacles = session.obstacles();
    let collectibles = session.collectibles();
    let elapsed = session.elapsed();
    let player = session.player();

    session.push_drag(500.0, 500.0);
    for _ in 0..10 {
        assert_eq!(session.tick(0.1), TickReport::default());
    }

    assert_eq!(session.obstacles(), obstacles);
    assert_eq!(session.collectibles(), collectibles);
    assert_eq!(session.elapsed(), elapsed);
    assert_eq!(session.player(), player);
    assert_eq!(session.score(), 0);
}

#[test]
fn collectible_scores_once_per_cycle() {
    let mut session = running(GameConfig::seeded(6));
    park_obstacles(&mut session);
    park_collectibles(&mut session);
    set_collectible(&mut session, 3, Vec3::new(0.0, 0.0, -3.0));

    let mut pickups = 0;
    let mut recycled = false;
    for _ in 0..40 {
        let report = session.tick(0.05);
        pickups += report.collected.iter().filter(|id| **id == 3).count();
        let (c, pos) = collectible(&session, 3);
        if pos.z == -50.0 {
            assert!(!c.collected);
            recycled = true;
            break;
        }
    }

    assert!(recycled, "collectible never passed the player");
    assert_eq!(pickups, 1);
    assert_eq!(session.score(), 10);
}

#[test]
fn score_only_grows_in_steps_of_ten() {
    let mut session = running(GameConfig::seeded(7));
    let mut rng = StdRng::seed_from_u64(77);
    let mut last = 0;

    for _ in 0..1200 {
        if session.state() != SessionState::Running {
            break;
        }
        session.push_drag(rng.gen_range(-40.0f32..40.0), rng.gen_range(-40.0f32..40.0));
        session.tick(1.0 / 30.0);
        let score = session.score();
        assert!(score >= last);
        assert_eq!(score % 10, 0);
        last = score;
    }
}

#[test]
fn restart_resets_score_and_layout() {
    let mut session = running(slow_obstacles(8));
    set_collectible(&mut session, 0, Vec3::new(0.0, 0.0, -1.0));
    session.tick(0.1);
    session.tick(12.0);
    assert!(session.score() >= 10);
    assert_eq!(session.obstacle_count(), 6);

    set_obstacle(&mut session, 0, Vec3::new(0.0, 0.0, 0.0));
    session.tick(0.01);
    assert_eq!(session.state(), SessionState::Over);

    session.restart().expect("over session restarts");

    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.elapsed(), 0.0);
    assert_eq!(session.player(), Vec3::ZERO);
    assert_eq!(session.obstacle_count(), 5);
    assert_eq!(session.collectible_count(), 10);
    assert!(session.collectibles().iter().all(|(c, _)| !c.collected));
    for (o, pos) in session.obstacles() {
        assert_eq!(pos.z, -20.0 - 10.0 * o.id as f32);
    }
    for (c, pos) in session.collectibles() {
        assert_eq!(pos.z, -15.0 - 5.0 * c.id as f32);
    }
}

#[test]
fn idle_and_over_reject_play_input() {
    let mut session = GameSession::with_config(GameConfig::seeded(9)).expect("valid");
    assert!(session.restart().is_err());
    assert_eq!(session.tick(0.5), TickReport::default());
    assert_eq!(session.score(), 0);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn scene_reflects_session() {
    let mut session = running(GameConfig::seeded(10));
    park_obstacles(&mut session);
    session.push_drag(40.0, 40.0);
    session.tick(0.0);

    let frame = session.scene();
    assert_eq!(frame.player, session.player());
    assert_relative_eq!(frame.camera.position.x, session.player().x * 0.3);
    assert_eq!(frame.obstacles.len(), 5);
    assert_eq!(frame.collectibles.len(), 10);
}
