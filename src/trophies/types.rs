//! Trophy system types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::stats::LifetimeStats;

/// Trophy tiers, lowest first. `Platinum` holds exactly one meta trophy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrophyTier {
    Bronze,
    Silver,
    Gold,
    Diamond,
    Legendary,
    Platinum,
}

impl TrophyTier {
    /// All tiers in display order.
    pub const ALL: [TrophyTier; 6] = [
        TrophyTier::Bronze,
        TrophyTier::Silver,
        TrophyTier::Gold,
        TrophyTier::Diamond,
        TrophyTier::Legendary,
        TrophyTier::Platinum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrophyTier::Bronze => "Bronze",
            TrophyTier::Silver => "Silver",
            TrophyTier::Gold => "Gold",
            TrophyTier::Diamond => "Diamond",
            TrophyTier::Legendary => "Legendary",
            TrophyTier::Platinum => "Platinum",
        }
    }
}

/// Everything a trophy condition may look at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub lifetime: LifetimeStats,
    pub high_score: u64,
    /// Spendable coin balance
    pub coins: u64,
    pub unlocked_skins: BTreeSet<String>,
    pub score_multiplier: u32,
    pub challenge_group: u32,
    pub run_coins: u32,
    pub run_near_misses: u32,
    /// Trophy ids already earned
    pub earned: BTreeSet<String>,
}

/// Declarative unlock condition; thresholds are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrophyCondition {
    GamesPlayed(u32),
    HighScore(u64),
    TotalScore(u64),
    TotalCoins(u64),
    /// Spendable balance, not lifetime coins
    BankedCoins(u64),
    TotalNearMisses(u64),
    RunNearMisses(u32),
    RunCoins(u32),
    SkinsUnlocked(usize),
    SkinOwned(&'static str),
    ScoreMultiplier(u32),
    ChallengeGroup(u32),
    /// Every other trophy in `table` is already earned
    AllOthersEarned,
}

impl TrophyCondition {
    /// Evaluate against a snapshot. `table` is only consulted by the meta condition.
    pub fn is_met(&self, snapshot: &ProgressSnapshot, table: &[TrophyDef]) -> bool {
        match *self {
            TrophyCondition::GamesPlayed(n) => snapshot.lifetime.games_played >= n,
            TrophyCondition::HighScore(n) => snapshot.high_score >= n,
            TrophyCondition::TotalScore(n) => snapshot.lifetime.total_score >= n,
            TrophyCondition::TotalCoins(n) => snapshot.lifetime.total_coins >= n,
            TrophyCondition::BankedCoins(n) => snapshot.coins >= n,
            TrophyCondition::TotalNearMisses(n) => snapshot.lifetime.total_near_misses >= n,
            TrophyCondition::RunNearMisses(n) => snapshot.run_near_misses >= n,
            TrophyCondition::RunCoins(n) => snapshot.run_coins >= n,
            TrophyCondition::SkinsUnlocked(n) => snapshot.unlocked_skins.len() >= n,
            TrophyCondition::SkinOwned(skin) => snapshot.unlocked_skins.contains(skin),
            TrophyCondition::ScoreMultiplier(n) => snapshot.score_multiplier >= n,
            TrophyCondition::ChallengeGroup(n) => snapshot.challenge_group >= n,
            TrophyCondition::AllOthersEarned => table
                .iter()
                .filter(|t| t.condition != TrophyCondition::AllOthersEarned)
                .all(|t| snapshot.earned.contains(t.id)),
        }
    }
}

/// Static definition of a trophy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrophyDef {
    pub id: &'static str,
    pub tier: TrophyTier,
    /// Display rank, 1-based and contiguous
    pub order: u32,
    pub condition: TrophyCondition,
}
