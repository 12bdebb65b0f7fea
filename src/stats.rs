//! Player profile and lifetime statistics
//!
//! Persisted by the host as JSON; the core only folds finished runs into it
//! and derives trophy snapshots from it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::trophies::{ProgressSnapshot, evaluate_trophies};

/// Skin every profile owns
pub const DEFAULT_SKIN: &str = "default";

/// Counters of a single finished (or in-progress) run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub coins: u32,
    pub near_misses: u32,
}

/// Counters accumulated across every run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_coins: u64,
    pub total_score: u64,
    pub games_played: u32,
    pub total_near_misses: u64,
}

impl LifetimeStats {
    /// Add one finished run
    pub fn record(&mut self, run: &RunSummary) {
        self.total_coins += run.coins as u64;
        self.total_score += run.score;
        self.games_played += 1;
        self.total_near_misses += run.near_misses as u64;
    }
}

/// Everything the trophy and challenge systems read about a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub lifetime: LifetimeStats,
    pub high_score: u64,
    /// Spendable coin balance
    pub coins: u64,
    pub unlocked_skins: BTreeSet<String>,
    /// Purchased score multiplier level (1 = none)
    pub score_multiplier: u32,
    /// Active challenge group index
    pub challenge_group: u32,
    pub earned_trophies: BTreeSet<String>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            lifetime: LifetimeStats::default(),
            high_score: 0,
            coins: 0,
            unlocked_skins: BTreeSet::from([DEFAULT_SKIN.to_string()]),
            score_multiplier: 1,
            challenge_group: 0,
            earned_trophies: BTreeSet::new(),
        }
    }
}

impl PlayerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the profile.
    /// Returns true if the run set a new high score.
    pub fn record_run(&mut self, run: &RunSummary) -> bool {
        self.lifetime.record(run);
        self.coins += run.coins as u64;

        let new_high = run.score > self.high_score;
        if new_high {
            self.high_score = run.score;
        }
        log::info!(
            "Run recorded: score={} coins={} near_misses={} (games played: {})",
            run.score,
            run.coins,
            run.near_misses,
            self.lifetime.games_played
        );
        new_high
    }

    /// Spend coins if the balance allows it
    pub fn spend_coins(&mut self, amount: u64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Progress snapshot for the trophy engine.
    ///
    /// `run` supplies the per-run counters; without one they read as zero.
    pub fn snapshot(&self, run: Option<&RunSummary>) -> ProgressSnapshot {
        let run = run.copied().unwrap_or_default();
        ProgressSnapshot {
            lifetime: self.lifetime,
            high_score: self.high_score,
            coins: self.coins,
            unlocked_skins: self.unlocked_skins.clone(),
            score_multiplier: self.score_multiplier,
            challenge_group: self.challenge_group,
            run_coins: run.coins,
            run_near_misses: run.near_misses,
            earned: self.earned_trophies.clone(),
        }
    }

    /// Evaluate trophies and store the newly earned ones.
    ///
    /// Re-evaluates until nothing new unlocks, so a meta trophy completed by
    /// this call is returned too.
    pub fn award_trophies(&mut self, run: Option<&RunSummary>) -> Vec<&'static str> {
        let mut awarded = Vec::new();
        loop {
            let fresh = evaluate_trophies(&self.snapshot(run));
            if fresh.is_empty() {
                break;
            }
            for id in fresh {
                log::info!("Trophy unlocked: {id}");
                self.earned_trophies.insert(id.to_string());
                awarded.push(id);
            }
        }
        awarded
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut profile: Self = serde_json::from_str(json)?;
        profile.unlocked_skins.insert(DEFAULT_SKIN.to_string());
        profile.score_multiplier = profile.score_multiplier.max(1);
        Ok(profile)
    }

    /// Load a stored profile, starting fresh when absent or unreadable
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("No profile found, starting fresh");
            return Self::new();
        };
        match Self::from_json(json) {
            Ok(profile) => {
                log::info!(
                    "Loaded profile ({} trophies earned)",
                    profile.earned_trophies.len()
                );
                profile
            }
            Err(err) => {
                log::warn!("Corrupt profile ({err}), starting fresh");
                Self::new()
            }
        }
    }
}
