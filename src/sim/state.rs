//! Run state and core simulation types
//!
//! Everything a run mutates lives in [`RunState`]; helpers elsewhere in `sim`
//! borrow it per call and keep nothing between calls.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::geometry::Rect;
use crate::consts::*;

/// One of the two lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Left, Lane::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Right => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Lane {
        match self {
            Lane::Left => Lane::Right,
            Lane::Right => Lane::Left,
        }
    }

    /// Uniformly random lane
    pub fn random<R: Rng>(rng: &mut R) -> Lane {
        if rng.random_bool(0.5) {
            Lane::Left
        } else {
            Lane::Right
        }
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (the only phase `tick` mutates in)
    Playing,
    /// Suspended by the host
    Paused,
    /// Player hit an obstacle; a revive may resume play
    GameOver,
}

/// The player's collision circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lane: Lane,
    /// Vertical centre, fixed for the run
    pub center_y: f32,
    pub radius: f32,
}

impl Player {
    /// Centre of the collision circle given the run's lane centres
    #[inline]
    pub fn center(&self, lane_x: &[f32; 2]) -> Vec2 {
        Vec2::new(lane_x[self.lane.index()], self.center_y)
    }
}

/// Build a player at the fixed vertical fraction of the screen.
///
/// With no lane given, one is drawn uniformly from `rng`.
pub fn create_initial_player<R: Rng>(
    screen_height: f32,
    lane: Option<Lane>,
    rng: &mut R,
) -> Player {
    Player {
        lane: lane.unwrap_or_else(|| Lane::random(rng)),
        center_y: screen_height * PLAYER_Y_FRACTION,
        radius: PLAYER_RADIUS,
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Running minimum circle-to-rect distance while the bottom edge was above the player
    pub min_distance_while_above: Option<f32>,
    pub near_miss_awarded: bool,
    /// Set the first tick the bottom edge is seen below the player's centre
    #[serde(default)]
    pub passed_player: bool,
}

impl Obstacle {
    /// A fresh obstacle centred on `lane_center_x`, just above the visible area
    pub fn new(id: u32, lane: Lane, lane_center_x: f32) -> Self {
        Self {
            id,
            lane,
            x: lane_center_x - OBSTACLE_WIDTH / 2.0,
            y: -OBSTACLE_HEIGHT,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            min_distance_while_above: None,
            near_miss_awarded: false,
            passed_player: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: Lane,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Coin {
    pub fn new(id: u32, lane: Lane, lane_center_x: f32) -> Self {
        Self {
            id,
            lane,
            x: lane_center_x - COIN_SIZE / 2.0,
            y: -COIN_SIZE,
            width: COIN_SIZE,
            height: COIN_SIZE,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Mutable state of a single run, owned by the tick engine
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Insertion ordered
    pub obstacles: Vec<Obstacle>,
    /// Insertion ordered
    pub coins: Vec<Coin>,
    pub score: u64,
    /// Sub-interval carry for survival scoring
    pub accumulated_score_ms: f64,
    pub last_spawn_time: f64,
    pub last_coin_spawn_time: f64,
    /// Host clock value when the run began
    pub run_started_at: f64,
    pub obstacle_speed: f32,
    /// Simulated time: advances only while playing, by the capped delta
    pub game_time_ms: f64,
    /// Lane centre X coordinates (left, right)
    pub lane_x: [f32; 2],
    pub screen_width: f32,
    pub screen_height: f32,
    pub near_miss_streak: u32,
    pub coin_multiplier_active_until: f64,
    /// No obstacles spawn while `now < revive_grace_until`
    pub revive_grace_until: f64,
    /// Coins collected this run
    pub run_coins: u32,
    /// Near-misses awarded this run
    pub run_near_misses: u32,
    pub curve: DifficultyCurve,
    next_id: u32,
}

impl RunState {
    /// Start a run at host time `now_ms`
    pub fn new(screen_width: f32, screen_height: f32, seed: u64, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = create_initial_player(screen_height, None, &mut rng);
        let curve = DifficultyCurve::default();

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            player,
            obstacles: Vec::new(),
            coins: Vec::new(),
            score: 0,
            accumulated_score_ms: 0.0,
            last_spawn_time: now_ms,
            last_coin_spawn_time: now_ms,
            run_started_at: now_ms,
            obstacle_speed: curve.obstacle_speed(0, 0.0),
            game_time_ms: 0.0,
            lane_x: [
                screen_width * LANE_X_FRACTIONS[0],
                screen_width * LANE_X_FRACTIONS[1],
            ],
            screen_width,
            screen_height,
            near_miss_streak: 0,
            coin_multiplier_active_until: f64::NEG_INFINITY,
            revive_grace_until: f64::NEG_INFINITY,
            run_coins: 0,
            run_near_misses: 0,
            curve,
            next_id: 1,
        }
    }

    /// Replace the difficulty curve (e.g. balance loaded from JSON)
    pub fn with_curve(mut self, curve: DifficultyCurve) -> Self {
        self.obstacle_speed = curve.obstacle_speed(self.score, self.game_time_ms);
        self.curve = curve;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    #[inline]
    pub fn lane_center_x(&self, lane: Lane) -> f32 {
        self.lane_x[lane.index()]
    }

    #[inline]
    pub fn player_center(&self) -> Vec2 {
        self.player.center(&self.lane_x)
    }

    /// Number of obstacles in `lane` whose top is inside the top zone
    pub fn top_zone_obstacles(&self, lane: Lane) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.lane == lane && o.y < TOP_ZONE)
            .count()
    }

    /// Suspend a playing run
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    /// Resume a paused run
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Per-run counters for stats, challenges and trophies
    pub fn summary(&self) -> crate::stats::RunSummary {
        crate::stats::RunSummary {
            score: self.score,
            coins: self.run_coins,
            near_misses: self.run_near_misses,
        }
    }
}
