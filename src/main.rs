//! Lane Dodge headless runner
//!
//! Plays one seeded run with a simple autopilot on a synthetic 60 Hz clock,
//! then folds it into a fresh profile and prints challenges and trophies.
//!
//! Usage: `lane-dodge [seed] [shuffle_seed] [curve.json]`

use lane_dodge::challenges::{
    get_challenges_for_group, get_initial_progress_for_group, update_progress,
};
use lane_dodge::consts::*;
use lane_dodge::sim::{DifficultyCurve, GamePhase, Lane, RunState, swap_player_lane, tick};
use lane_dodge::stats::PlayerProfile;
use lane_dodge::trophies::{TrophyTier, get_trophy_def};

/// Synthetic frame length (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Hard stop for the demo (5 simulated minutes)
const MAX_FRAMES: u32 = 60 * 60 * 5;
/// How far above the player the autopilot looks
const LOOKAHEAD: f32 = 180.0;

/// Swap lanes when the current lane is threatened and the other one is not
fn autopilot(state: &mut RunState) {
    let player_y = state.player.center_y;
    let threatened = |lane: Lane| {
        state.obstacles.iter().any(|o| {
            o.lane == lane
                && o.bottom() > player_y - LOOKAHEAD
                && o.y < player_y + state.player.radius
        })
    };
    let current = state.player.lane;
    if threatened(current) && !threatened(current.other()) {
        swap_player_lane(state);
    }
}

fn parse_arg<T: std::str::FromStr>(index: usize, default: T) -> T {
    std::env::args()
        .nth(index)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Balance from a JSON file, or the built-in curve
fn load_curve(path: Option<String>) -> DifficultyCurve {
    let Some(path) = path else {
        return DifficultyCurve::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => {
            log::info!("Loading difficulty curve from {path}");
            DifficultyCurve::from_json_or_default(&json)
        }
        Err(err) => {
            log::warn!("Could not read {path} ({err}), using default curve");
            DifficultyCurve::default()
        }
    }
}

fn main() {
    env_logger::init();

    let seed: u64 = parse_arg(1, 12345);
    let shuffle_seed: i64 = parse_arg(2, 0);
    let curve = load_curve(std::env::args().nth(3));

    let mut profile = PlayerProfile::new();
    let challenges = get_challenges_for_group(profile.challenge_group, shuffle_seed);
    let mut progress = get_initial_progress_for_group(profile.challenge_group, shuffle_seed);
    let baseline = profile.lifetime;

    let mut state =
        RunState::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT, seed, 0.0).with_curve(curve);
    let mut now = 0.0;
    let mut frames = 0;
    while state.phase == GamePhase::Playing && frames < MAX_FRAMES {
        autopilot(&mut state);
        now += FRAME_MS;
        let result = tick(&mut state, FRAME_MS, now);
        for id in &result.near_miss_ids {
            log::debug!("Near miss on obstacle {id} (streak {})", state.near_miss_streak);
        }
        frames += 1;
    }

    let run = state.summary();
    let new_high = profile.record_run(&run);
    update_progress(&challenges, &mut progress, &run, &profile.lifetime, &baseline);
    let trophies = profile.award_trophies(Some(&run));

    println!("Seed {seed}: {:?} after {:.1}s", state.phase, state.game_time_ms / 1000.0);
    println!(
        "Score {} (new high: {new_high}), coins {}, near-misses {}",
        run.score, run.coins, run.near_misses
    );
    for challenge in &challenges {
        let value = progress.get(&challenge.id).copied().unwrap_or(0);
        println!(
            "Challenge {} [{}]: {value}/{}",
            challenge.id,
            challenge.kind.as_str(),
            challenge.target
        );
    }
    println!("Trophies unlocked: {}", trophies.len());
    for tier in TrophyTier::ALL {
        let ids: Vec<&str> = trophies
            .iter()
            .copied()
            .filter(|id| get_trophy_def(id).is_some_and(|t| t.tier == tier))
            .collect();
        if !ids.is_empty() {
            println!("  {}: {}", tier.name(), ids.join(", "));
        }
    }
}
