//! Spirit Flight Headless Harness
//!
//! Drives real game sessions in-process and checks the flight rules,
//! the screen components and snapshots. No window, no device.
//!
//! Usage:
//!   cargo run -p spirit-simtest
//!   cargo run -p spirit-simtest -- --verbose
//!   cargo run -p spirit-simtest -- --config tuning.json

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spirit_core::config::load_config;
use spirit_core::host::{
    AudioError, AudioTrigger, LastFrame, NavigationController, Permission, PermissionGate,
    RenderSurface,
};
use spirit_core::prelude::*;
use spirit_core::screens::{ArView, CameraAccess, Sanctuary};
use spirit_logic::companion::{format_time_ago, Mood, SpiritProfile, Touch};
use spirit_logic::movement::{apply_drag, PlayArea};
use spirit_logic::navigation::{Navigator, Route};
use spirit_logic::session::{transition, SessionEvent};

const SWEEP_SEEDS: u64 = 32;
const SWEEP_TICKS: usize = 900;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Value of `--config`, if the flag is present.
fn config_arg(args: &[String]) -> Result<Option<&str>, String> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(path) if !path.starts_with("--") => Ok(Some(path.as_str())),
        _ => Err("--config needs a file path".to_string()),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let config_path = match config_arg(&args) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    println!("=== Spirit Flight Harness ===\n");

    let base = match config_path {
        Some(path) => match load_config(path) {
            Ok(config) => {
                info!("loaded tuning from {}", path);
                config
            }
            Err(e) => {
                eprintln!("could not load {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => GameConfig::default(),
    };

    let mut results = Vec::new();

    // 1. Tuning
    results.extend(validate_config(&base, verbose));

    // 2. Drag and play area
    results.extend(validate_drag(verbose));

    // 3. Lifecycle transitions
    results.extend(validate_lifecycle(verbose));

    // 4. Flight scenarios
    results.extend(validate_scenarios(verbose));

    // 5. Seeded property sweeps
    results.extend(validate_properties(&base, verbose));

    // 6. Navigation
    results.extend(validate_navigation(verbose));

    // 7. Sanctuary and companion
    results.extend(validate_sanctuary(verbose));

    // 8. AR placement
    results.extend(validate_ar(verbose));

    // 9. Snapshots
    results.extend(validate_snapshots(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Session helpers ─────────────────────────────────────────────────────

fn running(config: GameConfig) -> Option<GameSession> {
    let mut session = GameSession::with_config(config).ok()?;
    session.start().ok()?;
    Some(session)
}

fn place_obstacle(session: &mut GameSession, id: u32, at: Vec3) {
    for (_, (o, pos)) in session.world.query_mut::<(&Obstacle, &mut Position)>() {
        if o.id == id {
            pos.0 = at;
        }
    }
}

fn place_collectible(session: &mut GameSession, id: u32, at: Vec3) {
    for (_, (c, pos)) in session
        .world
        .query_mut::<(&Collectible, &mut Position)>()
    {
        if c.id == id {
            pos.0 = at;
        }
    }
}

fn park_obstacles(session: &mut GameSession) {
    for (_, (_, pos)) in session.world.query_mut::<(&Obstacle, &mut Position)>() {
        pos.0 = Vec3::new(4.9, 4.4, -45.0);
    }
}

fn failed_to_start(name: &str) -> TestResult {
    TestResult {
        name: name.into(),
        passed: false,
        detail: "session did not start".into(),
    }
}

// ── 1. Tuning ───────────────────────────────────────────────────────────

fn validate_config(base: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Tuning ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "config_defaults_valid".into(),
        passed: GameConfig::default().validate().is_ok(),
        detail: "built-in tuning passes validation".into(),
    });

    let d = GameConfig::default();
    results.push(TestResult {
        name: "config_default_values".into(),
        passed: d.obstacle_speed == 10.0
            && d.collectible_speed == 8.0
            && d.proximity_threshold == 1.5
            && d.collectible_points == 10
            && d.initial_obstacles == 5
            && d.initial_collectibles == 10
            && d.max_obstacles == 10
            && d.far_z == -50.0,
        detail: format!(
            "speeds {}/{} threshold {} cap {}",
            d.obstacle_speed, d.collectible_speed, d.proximity_threshold, d.max_obstacles
        ),
    });

    let inverted = GameConfig {
        min_x: 5.0,
        max_x: -5.0,
        ..GameConfig::default()
    };
    results.push(TestResult {
        name: "config_rejects_inverted_area".into(),
        passed: inverted.validate().is_err(),
        detail: "min_x > max_x is rejected".into(),
    });

    results.push(TestResult {
        name: "config_active_tuning_valid".into(),
        passed: base.validate().is_ok(),
        detail: format!("{:?}", base.play_area()),
    });

    if verbose {
        println!("  active tuning: {:?}", base);
    }

    results
}

// ── 2. Drag ─────────────────────────────────────────────────────────────

fn validate_drag(_verbose: bool) -> Vec<TestResult> {
    println!("--- Drag & Play Area ---");
    let mut results = Vec::new();
    let area = PlayArea::default();

    let (x, y) = apply_drag(&area, 0.0, 0.0, 20.0, 20.0, 0.05);
    results.push(TestResult {
        name: "drag_scaled_by_sensitivity".into(),
        passed: (x - 1.0).abs() < 1e-6 && (y - 1.0).abs() < 1e-6,
        detail: format!("20px drag moved to ({:.2}, {:.2})", x, y),
    });

    let mut rng = StdRng::seed_from_u64(99);
    let mut escaped = 0;
    let (mut x, mut y) = (0.0f32, 0.0f32);
    for _ in 0..10_000 {
        let scale: f32 = if rng.gen_bool(0.05) { 1e9 } else { 500.0 };
        let dx = rng.gen_range(-1.0f32..1.0) * scale;
        let dy = rng.gen_range(-1.0f32..1.0) * scale;
        (x, y) = apply_drag(&area, x, y, dx, dy, 0.05);
        if !area.contains(x, y) {
            escaped += 1;
        }
    }
    results.push(TestResult {
        name: "drag_never_leaves_area".into(),
        passed: escaped == 0,
        detail: format!("{} of 10000 random drags left the area", escaped),
    });

    let (nx, ny) = apply_drag(&area, 1.0, 1.0, f32::NAN, f32::INFINITY, 0.05);
    results.push(TestResult {
        name: "drag_ignores_non_finite".into(),
        passed: nx == 1.0 && ny == 1.0,
        detail: "NaN/inf drag leaves the player in place".into(),
    });

    results
}

// ── 3. Lifecycle ────────────────────────────────────────────────────────

fn validate_lifecycle(verbose: bool) -> Vec<TestResult> {
    println!("--- Lifecycle ---");
    let mut results = Vec::new();

    let states = [SessionState::Idle, SessionState::Running, SessionState::Over];
    let events = [SessionEvent::Start, SessionEvent::Collide, SessionEvent::Restart];
    let allowed = [
        (SessionState::Idle, SessionEvent::Start, SessionState::Running),
        (SessionState::Running, SessionEvent::Collide, SessionState::Over),
        (SessionState::Over, SessionEvent::Restart, SessionState::Running),
    ];

    let mut wrong = Vec::new();
    for &from in &states {
        for &event in &events {
            let expected = allowed
                .iter()
                .find(|(f, e, _)| *f == from && *e == event)
                .map(|(_, _, to)| *to);
            let got = transition(from, event).ok();
            if got != expected {
                wrong.push(format!("{}+{:?}", from.name(), event));
            }
            if verbose {
                println!("    {:8} + {:8?} → {:?}", from.name(), event, got);
            }
        }
    }
    results.push(TestResult {
        name: "lifecycle_transition_table".into(),
        passed: wrong.is_empty(),
        detail: if wrong.is_empty() {
            "3 allowed transitions, 6 rejected".into()
        } else {
            format!("unexpected: {}", wrong.join(", "))
        },
    });

    let mut session = GameSession::with_config(GameConfig::seeded(1)).ok();
    let idle_ok = session.as_mut().map_or(false, |s| {
        s.restart().is_err() && s.tick(1.0) == TickReport::default()
    });
    results.push(TestResult {
        name: "lifecycle_idle_is_inert".into(),
        passed: idle_ok,
        detail: "idle session rejects restart and ignores ticks".into(),
    });

    results
}

// ── 4. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Flight Scenarios ---");
    let mut results = Vec::new();

    // Collectible one unit ahead is picked up on the first tick
    match running(GameConfig::seeded(11)) {
        Some(mut session) => {
            place_collectible(&mut session, 0, Vec3::new(0.0, 0.0, -1.0));
            let report = session.tick(0.1);
            let collected = session
                .collectibles()
                .iter()
                .any(|(c, _)| c.id == 0 && c.collected);
            results.push(TestResult {
                name: "scenario_collect_near_orb".into(),
                passed: session.score() == 10 && collected && report.collected == vec![0],
                detail: format!("score {} after one 0.1s tick", session.score()),
            });
        }
        None => results.push(failed_to_start("scenario_collect_near_orb")),
    }

    // Obstacle past the player is recycled far away
    match running(GameConfig::seeded(12)) {
        Some(mut session) => {
            place_obstacle(&mut session, 1, Vec3::new(-4.0, 4.0, 4.6));
            let report = session.tick(0.1);
            let z = session
                .obstacles()
                .iter()
                .find(|(o, _)| o.id == 1)
                .map(|(_, p)| p.z);
            results.push(TestResult {
                name: "scenario_obstacle_recycled".into(),
                passed: z == Some(-50.0)
                    && report.obstacles_recycled == 1
                    && session.state() == SessionState::Running,
                detail: format!("obstacle 1 now at z={:?}", z),
            });
        }
        None => results.push(failed_to_start("scenario_obstacle_recycled")),
    }

    // One spawn per ten-second boundary
    let slow = GameConfig {
        obstacle_speed: 0.001,
        ..GameConfig::seeded(13)
    };
    match running(slow) {
        Some(mut session) => {
            let before = session.tick(9.95).obstacles_spawned;
            let at = session.tick(0.1).obstacles_spawned;
            let after: u32 = (0..5).map(|_| session.tick(0.1).obstacles_spawned).sum();
            results.push(TestResult {
                name: "scenario_boundary_spawns_once".into(),
                passed: before == 0 && at == 1 && after == 0 && session.obstacle_count() == 6,
                detail: format!(
                    "spawned {}/{}/{} → {} obstacles",
                    before,
                    at,
                    after,
                    session.obstacle_count()
                ),
            });

            for _ in 0..120 {
                session.tick(1.0);
            }
            results.push(TestResult {
                name: "scenario_ramp_capped".into(),
                passed: session.obstacle_count() == 10,
                detail: format!(
                    "{} obstacles after {:.0}s",
                    session.obstacle_count(),
                    session.elapsed()
                ),
            });
        }
        None => results.push(failed_to_start("scenario_boundary_spawns_once")),
    }

    results
}

// ── 5. Properties ───────────────────────────────────────────────────────

fn validate_properties(base: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Property Sweeps ({} seeds) ---", SWEEP_SEEDS);
    let mut results = Vec::new();
    let area = base.play_area();

    let mut out_of_bounds = 0;
    let mut bad_score = 0;
    let mut post_collision_changes = 0;
    let mut collisions = 0;
    let mut frames = LastFrame::default();

    for seed in 0..SWEEP_SEEDS {
        let config = GameConfig {
            seed: Some(seed),
            ..base.clone()
        };
        let Some(mut session) = running(config) else {
            results.push(failed_to_start("property_sweep"));
            return results;
        };
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut last_score = 0;

        for _ in 0..SWEEP_TICKS {
            if session.state() == SessionState::Over {
                break;
            }
            let scale: f32 = if rng.gen_bool(0.1) { 1e6 } else { 120.0 };
            session.push_drag(
                rng.gen_range(-1.0f32..1.0) * scale,
                rng.gen_range(-1.0f32..1.0) * scale,
            );
            let report = session.tick(1.0 / 60.0);
            frames.present(&session.scene());

            let p = session.player();
            if !area.contains(p.x, p.y) {
                out_of_bounds += 1;
            }
            let score = session.score();
            if score < last_score || (score - last_score) % base.collectible_points.max(1) != 0 {
                bad_score += 1;
            }
            last_score = score;

            if report.collided_with.is_some() {
                collisions += 1;
                let snapshot = (session.obstacles(), session.collectibles(), session.player());
                session.push_drag(300.0, 300.0);
                session.tick(0.5);
                if (session.obstacles(), session.collectibles(), session.player()) != snapshot
                    || session.score() != score
                {
                    post_collision_changes += 1;
                }
            }
        }
        debug!(
            "seed {}: {} at {:.1}s, score {}",
            seed,
            session.state().name(),
            session.elapsed(),
            session.score()
        );
    }

    results.push(TestResult {
        name: "property_player_in_bounds".into(),
        passed: out_of_bounds == 0,
        detail: format!("{} out-of-bounds ticks", out_of_bounds),
    });
    results.push(TestResult {
        name: "property_score_steps".into(),
        passed: bad_score == 0,
        detail: format!("{} ticks broke the score step", bad_score),
    });
    results.push(TestResult {
        name: "property_collision_freezes".into(),
        passed: post_collision_changes == 0,
        detail: format!(
            "{} collisions, {} changed state afterwards",
            collisions, post_collision_changes
        ),
    });
    results.push(TestResult {
        name: "property_frames_presented".into(),
        passed: frames.frames_presented > 0 && frames.frame.is_some(),
        detail: format!("{} frames presented", frames.frames_presented),
    });

    // Collection happens at most once per cycle
    match running(GameConfig::seeded(21)) {
        Some(mut session) => {
            park_obstacles(&mut session);
            place_collectible(&mut session, 2, Vec3::new(0.0, 0.0, -3.0));
            let mut pickups = 0;
            let mut cycled = false;
            for _ in 0..60 {
                let report = session.tick(0.05);
                pickups += report.collected.iter().filter(|id| **id == 2).count();
                if report.collectibles_recycled > 0
                    && session
                        .collectibles()
                        .iter()
                        .any(|(c, p)| c.id == 2 && !c.collected && p.z == -50.0)
                {
                    cycled = true;
                    break;
                }
            }
            results.push(TestResult {
                name: "property_collect_once_per_cycle".into(),
                passed: cycled && pickups == 1,
                detail: format!("{} pickups, recycled={}", pickups, cycled),
            });
        }
        None => results.push(failed_to_start("property_collect_once_per_cycle")),
    }

    // Restart from game over
    match running(GameConfig::seeded(22)) {
        Some(mut session) => {
            place_collectible(&mut session, 0, Vec3::new(0.0, 0.0, -1.0));
            session.tick(0.1);
            place_obstacle(&mut session, 0, Vec3::ZERO);
            session.tick(0.01);
            let over = session.state() == SessionState::Over;
            let restarted = session.restart().is_ok();
            results.push(TestResult {
                name: "property_restart_resets".into(),
                passed: over
                    && restarted
                    && session.score() == 0
                    && session.obstacle_count() == 5
                    && session.collectible_count() == 10
                    && session.collectibles().iter().all(|(c, _)| !c.collected),
                detail: format!(
                    "score {} obstacles {} collectibles {}",
                    session.score(),
                    session.obstacle_count(),
                    session.collectible_count()
                ),
            });
        }
        None => results.push(failed_to_start("property_restart_resets")),
    }

    if verbose {
        if let Some(frame) = &frames.frame {
            println!(
                "  last frame: {} obstacles, {} orbs, camera {:?}",
                frame.obstacles.len(),
                frame.collectibles.len(),
                frame.camera.position
            );
        }
    }

    results
}

// ── 6. Navigation ───────────────────────────────────────────────────────

fn validate_navigation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Navigation ---");
    let mut results = Vec::new();

    let names_ok = Route::ALL
        .iter()
        .all(|r| Route::from_name(r.name()).ok() == Some(*r));
    results.push(TestResult {
        name: "nav_route_names".into(),
        passed: names_ok && Route::from_name("AR").is_ok(),
        detail: Route::ALL
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", "),
    });

    let unknown: Vec<_> = ["Customize", "Feed", "Play", "Speak"]
        .iter()
        .filter(|n| Route::from_name(n).is_ok())
        .collect();
    results.push(TestResult {
        name: "nav_unknown_routes_rejected".into(),
        passed: unknown.is_empty(),
        detail: format!("{} unregistered names accepted", unknown.len()),
    });

    let mut nav = Navigator::new();
    let controller: &mut dyn NavigationController = &mut nav;
    controller.navigate(Route::Sanctuary);
    controller.navigate(Route::MiniGame);
    let at_game = controller.current() == Route::MiniGame;
    let back = controller.go_back() && controller.go_back();
    let root_noop = !controller.go_back() && controller.current() == Route::Home;
    results.push(TestResult {
        name: "nav_stack_back_to_home".into(),
        passed: at_game && back && root_noop,
        detail: "Home → Sanctuary → MiniGame, back twice, root stays".into(),
    });

    results
}

// ── 7. Sanctuary ────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingAudio {
    played: Vec<String>,
    broken: bool,
}

impl AudioTrigger for CountingAudio {
    fn play(&mut self, clip: &str) -> Result<(), AudioError> {
        if self.broken {
            return Err(AudioError::Playback("device busy".into()));
        }
        self.played.push(clip.to_string());
        Ok(())
    }
}

fn validate_sanctuary(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sanctuary ---");
    let mut results = Vec::new();

    let mut sanctuary = Sanctuary::new(SpiritProfile::default());
    let mut audio = CountingAudio::default();
    let pet = sanctuary.touch(0.9, &mut audio);
    results.push(TestResult {
        name: "sanctuary_pet_purrs".into(),
        passed: pet == Touch::Pet
            && sanctuary.mood() == Mood::Happy
            && audio.played == ["purr"]
            && sanctuary.is_petted(),
        detail: format!("{:?} → {}", pet, sanctuary.mood().label()),
    });

    let tickle = sanctuary.touch(0.2, &mut audio);
    results.push(TestResult {
        name: "sanctuary_tickle_playful".into(),
        passed: tickle == Touch::Tickle
            && sanctuary.mood() == Mood::Playful
            && audio.played.len() == 1,
        detail: format!("{:?} → {}", tickle, sanctuary.mood().label()),
    });

    sanctuary.update(2.5);
    let glow_done = !sanctuary.is_glowing() && sanctuary.mood_message().is_some();
    sanctuary.update(1.0);
    results.push(TestResult {
        name: "sanctuary_timers_expire".into(),
        passed: glow_done && sanctuary.mood_message().is_none(),
        detail: "glow clears at 2s, mood indicator at 3s".into(),
    });

    let mut broken = CountingAudio {
        broken: true,
        ..Default::default()
    };
    let mut quiet = Sanctuary::default();
    quiet.touch(1.0, &mut broken);
    results.push(TestResult {
        name: "sanctuary_audio_failure_ignored".into(),
        passed: quiet.is_petted() && quiet.mood() == Mood::Happy,
        detail: "pet still lands when audio fails".into(),
    });

    let plurals = format_time_ago(0) == "Just now"
        && format_time_ago(60) == "1 minute ago"
        && format_time_ago(7200) == "2 hours ago"
        && format_time_ago(86_400 * 3) == "3 days ago";
    results.push(TestResult {
        name: "companion_time_ago".into(),
        passed: plurals,
        detail: format!("last seen {}", SpiritProfile::default().last_seen()),
    });

    results
}

// ── 8. AR ───────────────────────────────────────────────────────────────

struct FixedGate(Permission);

impl PermissionGate for FixedGate {
    fn request_camera(&mut self) -> Permission {
        self.0
    }
}

fn validate_ar(_verbose: bool) -> Vec<TestResult> {
    println!("--- AR ---");
    let mut results = Vec::new();

    let mut denied = ArView::new();
    let access = denied.request(&mut FixedGate(Permission::Denied));
    results.push(TestResult {
        name: "ar_denied_no_access".into(),
        passed: access == CameraAccess::NoAccess
            && !denied.tap(100.0, 100.0)
            && denied.status_text() == Some("No access to camera"),
        detail: format!("{:?}", access),
    });

    let mut granted = ArView::new();
    granted.request(&mut FixedGate(Permission::Granted));
    let placed = granted.tap(200.0, 300.0);
    let origin = granted.placement().overlay_origin();
    granted.reset();
    results.push(TestResult {
        name: "ar_tap_places_centered".into(),
        passed: placed && origin == Some((125.0, 225.0)) && !granted.placement().is_placed(),
        detail: format!("tap (200, 300) → overlay at {:?}", origin),
    });

    results
}

// ── 9. Snapshots ────────────────────────────────────────────────────────

fn validate_snapshots(_verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshots ---");
    let mut results = Vec::new();

    let Some(mut session) = running(GameConfig::seeded(31)) else {
        results.push(failed_to_start("snapshot_roundtrip"));
        return results;
    };
    park_obstacles(&mut session);
    session.push_drag(-40.0, 30.0);
    session.tick(0.25);

    let mut buffer = Vec::new();
    let saved = session.save(&mut buffer);
    let mut restored = GameSession::new();
    let loaded = restored.load(&buffer[..]);

    results.push(TestResult {
        name: "snapshot_roundtrip".into(),
        passed: saved.is_ok()
            && loaded.is_ok()
            && restored.state() == session.state()
            && restored.score() == session.score()
            && restored.player() == session.player()
            && restored.obstacles() == session.obstacles()
            && restored.collectibles() == session.collectibles(),
        detail: format!("{} bytes", buffer.len()),
    });

    buffer.truncate(buffer.len() / 3);
    results.push(TestResult {
        name: "snapshot_truncated_rejected".into(),
        passed: GameSession::new().load(&buffer[..]).is_err(),
        detail: "partial snapshot fails to load".into(),
    });

    results
}
