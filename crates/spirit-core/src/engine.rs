//! Game session - main entry point for running the flight game

use hecs::World;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spirit_logic::config::{ConfigError, GameConfig};
use spirit_logic::session::{transition, SessionEvent, SessionState, TransitionError};
use thiserror::Error;

use crate::components::*;
use crate::generation::generate_layout;
use crate::scene::SceneFrame;
use crate::systems::*;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("invalid game config: {0}")]
    Config(#[from] ConfigError),
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Score added this tick.
    pub points: u64,
    /// Collectible ids picked up this tick.
    pub collected: Vec<u32>,
    /// Set when an obstacle ended the session this tick.
    pub collided_with: Option<u32>,
    pub obstacles_recycled: u32,
    pub collectibles_recycled: u32,
    pub obstacles_spawned: u32,
}

/// One flight-game session: idle menu, running play, game over, replays.
pub struct GameSession {
    /// ECS world containing obstacles and collectibles
    pub world: World,
    state: SessionState,
    score: u64,
    /// Seconds of running time since the last start/restart
    elapsed: f32,
    player: Vec3,
    pending: PendingDrag,
    next_obstacle_id: u32,
    config: GameConfig,
    rng: StdRng,
}

fn make_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl GameSession {
    /// Create an idle session with default tuning
    pub fn new() -> Self {
        let config = GameConfig::default();
        Self {
            world: World::new(),
            state: SessionState::Idle,
            score: 0,
            elapsed: 0.0,
            player: Vec3::ZERO,
            pending: PendingDrag::default(),
            next_obstacle_id: 0,
            rng: make_rng(&config),
            config,
        }
    }

    /// Create an idle session with custom tuning
    pub fn with_config(config: GameConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            rng: make_rng(&config),
            config,
            ..Self::new()
        })
    }

    /// Leave the menu and begin play.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.apply(SessionEvent::Start)?;
        self.reset_round();
        info!("session started with {} obstacles", self.obstacle_count());
        Ok(())
    }

    /// Play again after game over. Score, time and layout start fresh.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.apply(SessionEvent::Restart)?;
        self.reset_round();
        info!("session restarted");
        Ok(())
    }

    fn apply(&mut self, event: SessionEvent) -> Result<(), TransitionError> {
        match transition(self.state, event) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    fn reset_round(&mut self) {
        self.world.clear();
        self.score = 0;
        self.elapsed = 0.0;
        self.player = Vec3::ZERO;
        self.pending.clear();
        self.next_obstacle_id = generate_layout(&mut self.world, &self.config, &mut self.rng);
    }

    /// Buffer a drag gesture. Ignored unless running.
    pub fn push_drag(&mut self, dx: f32, dy: f32) {
        if self.state.is_running() {
            self.pending.push(dx, dy);
        }
    }

    /// Advance the session by `delta_seconds`
    pub fn tick(&mut self, delta_seconds: f32) -> TickReport {
        let mut report = TickReport::default();
        if !self.state.is_running() {
            return report;
        }

        let delta = if delta_seconds.is_finite() && delta_seconds > 0.0 {
            delta_seconds
        } else {
            0.0
        };

        // 1. Player input
        player_system(&mut self.player, &mut self.pending, &self.config);

        // 2. Obstacles; a hit ends the tick immediately
        let obstacles = obstacle_system(
            &mut self.world,
            self.player,
            &self.config,
            delta,
            &mut self.rng,
        );
        report.obstacles_recycled = obstacles.recycled;
        if let Some(id) = obstacles.collided_with {
            report.collided_with = Some(id);
            if self.apply(SessionEvent::Collide).is_ok() {
                info!(
                    "game over: hit obstacle {} after {:.1}s, final score {}",
                    id, self.elapsed, self.score
                );
            }
            return report;
        }

        // 3. Collectibles
        let collected = collectible_system(
            &mut self.world,
            self.player,
            &self.config,
            delta,
            &mut self.rng,
        );
        report.collectibles_recycled = collected.recycled;

        // 4. Score applied once per tick
        self.score += collected.points;
        report.points = collected.points;
        report.collected = collected.collected;

        // 5. Difficulty ramp
        let before = self.elapsed;
        self.elapsed += delta;
        report.obstacles_spawned = difficulty_system(
            &mut self.world,
            before,
            self.elapsed,
            &self.config,
            &mut self.next_obstacle_id,
            &mut self.rng,
        );

        report
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Seconds of running time since the last start/restart
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn player(&self) -> Vec3 {
        self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn next_obstacle_id(&self) -> u32 {
        self.next_obstacle_id
    }

    pub fn obstacle_count(&self) -> usize {
        self.world.query::<&Obstacle>().iter().count()
    }

    pub fn collectible_count(&self) -> usize {
        self.world.query::<&Collectible>().iter().count()
    }

    /// Obstacles with their positions, sorted by id
    pub fn obstacles(&self) -> Vec<(Obstacle, Vec3)> {
        let mut out: Vec<(Obstacle, Vec3)> = self
            .world
            .query::<(&Obstacle, &Position)>()
            .iter()
            .map(|(_, (o, p))| (*o, p.0))
            .collect();
        out.sort_by_key(|(o, _)| o.id);
        out
    }

    /// Collectibles with their positions, sorted by id
    pub fn collectibles(&self) -> Vec<(Collectible, Vec3)> {
        let mut out: Vec<(Collectible, Vec3)> = self
            .world
            .query::<(&Collectible, &Position)>()
            .iter()
            .map(|(_, (c, p))| (*c, p.0))
            .collect();
        out.sort_by_key(|(c, _)| c.id);
        out
    }

    /// Scene description for the render surface
    pub fn scene(&self) -> SceneFrame {
        SceneFrame::capture(self)
    }

    /// Save session state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), crate::persistence::SaveError> {
        crate::persistence::save_session(
            writer,
            self.state,
            self.score,
            self.elapsed,
            self.player,
            self.next_obstacle_id,
            &self.config,
            &self.world,
        )
    }

    /// Load session state from a reader
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), crate::persistence::SaveError> {
        let loaded = crate::persistence::load_session(reader)?;

        self.world = loaded.world;
        self.state = loaded.state;
        self.score = loaded.score;
        self.elapsed = loaded.elapsed;
        self.player = loaded.player;
        self.next_obstacle_id = loaded.next_obstacle_id;
        self.rng = make_rng(&loaded.config);
        self.config = loaded.config;
        self.pending.clear();

        info!(
            "session loaded: {} at {:.1}s, score {}",
            self.state.name(),
            self.elapsed,
            self.score
        );
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
