//! Challenge generator
//!
//! Every group index maps to a fixed pair of challenges. The pair is chosen by
//! a seeded shuffle of the seven challenge kinds, so two installs with
//! different shuffle seeds see different pairs while each install stays stable.

pub mod lcg;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::{LifetimeStats, RunSummary};
use lcg::Lcg;

/// Progress per challenge id
pub type ChallengeProgress = BTreeMap<String, u64>;

/// Whether a challenge is judged per run or across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeScope {
    Run,
    Cumulative,
}

/// Challenge kinds, in canonical (unshuffled) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    NearMissRun,
    CoinsRun,
    ScoreRun,
    CoinsTotal,
    ScoreTotal,
    GamesPlayed,
    NearMissTotal,
}

/// Target scaling: `clamp(round(base + group * step), min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRule {
    pub base: f64,
    pub step: f64,
    pub min: u64,
    pub max: u64,
}

impl ChallengeType {
    pub const ALL: [ChallengeType; 7] = [
        ChallengeType::NearMissRun,
        ChallengeType::CoinsRun,
        ChallengeType::ScoreRun,
        ChallengeType::CoinsTotal,
        ChallengeType::ScoreTotal,
        ChallengeType::GamesPlayed,
        ChallengeType::NearMissTotal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeType::NearMissRun => "near_miss_run",
            ChallengeType::CoinsRun => "coins_run",
            ChallengeType::ScoreRun => "score_run",
            ChallengeType::CoinsTotal => "coins_total",
            ChallengeType::ScoreTotal => "score_total",
            ChallengeType::GamesPlayed => "games_played",
            ChallengeType::NearMissTotal => "near_miss_total",
        }
    }

    pub fn scope(&self) -> ChallengeScope {
        match self {
            ChallengeType::NearMissRun | ChallengeType::CoinsRun | ChallengeType::ScoreRun => {
                ChallengeScope::Run
            }
            _ => ChallengeScope::Cumulative,
        }
    }

    pub fn target_rule(&self) -> TargetRule {
        let (base, step, min, max) = match self {
            ChallengeType::NearMissRun => (2.0, 0.5, 2, 25),
            ChallengeType::CoinsRun => (3.0, 0.75, 3, 40),
            ChallengeType::ScoreRun => (500.0, 300.0, 500, 15_000),
            ChallengeType::CoinsTotal => (20.0, 15.0, 20, 800),
            ChallengeType::ScoreTotal => (2000.0, 1500.0, 2000, 80_000),
            ChallengeType::GamesPlayed => (2.0, 1.0, 2, 50),
            ChallengeType::NearMissTotal => (5.0, 2.0, 5, 100),
        };
        TargetRule {
            base,
            step,
            min,
            max,
        }
    }

    /// Target for this kind at `group_index`
    pub fn target_for_group(&self, group_index: u32) -> u64 {
        let rule = self.target_rule();
        let raw = (rule.base + group_index as f64 * rule.step).round();
        // f64 -> u64 saturates, so huge groups land on `max`
        (raw as u64).clamp(rule.min, rule.max)
    }
}

/// One challenge slot of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    pub target: u64,
    /// Opaque presentation key
    pub description_key: String,
}

impl Challenge {
    pub fn scope(&self) -> ChallengeScope {
        self.kind.scope()
    }

    pub fn is_complete(&self, progress: &ChallengeProgress) -> bool {
        progress.get(&self.id).copied().unwrap_or(0) >= self.target
    }
}

/// Seed for a group's shuffle
pub fn group_seed(group_index: u32, shuffle_seed: i64) -> i64 {
    (group_index as i64 * 7919 + 1).wrapping_add(shuffle_seed)
}

/// The two challenges of `group_index` for an install's `shuffle_seed`
pub fn get_challenges_for_group(group_index: u32, shuffle_seed: i64) -> [Challenge; 2] {
    let mut kinds = ChallengeType::ALL;
    Lcg::new(group_seed(group_index, shuffle_seed)).shuffle(&mut kinds);

    let make = |slot: usize, kind: ChallengeType| Challenge {
        id: format!("group_{group_index}_challenge_{slot}"),
        kind,
        target: kind.target_for_group(group_index),
        description_key: format!("challenge_{}", kind.as_str()),
    };
    [make(0, kinds[0]), make(1, kinds[1])]
}

/// Zero progress for both challenges of a group
pub fn get_initial_progress_for_group(group_index: u32, shuffle_seed: i64) -> ChallengeProgress {
    get_challenges_for_group(group_index, shuffle_seed)
        .into_iter()
        .map(|c| (c.id, 0))
        .collect()
}

/// Lifetime counter behind a cumulative challenge; run-scoped kinds have none
pub fn get_lifetime_value(kind: ChallengeType, stats: &LifetimeStats) -> u64 {
    match kind {
        ChallengeType::CoinsTotal => stats.total_coins,
        ChallengeType::ScoreTotal => stats.total_score,
        ChallengeType::GamesPlayed => stats.games_played as u64,
        ChallengeType::NearMissTotal => stats.total_near_misses,
        ChallengeType::NearMissRun | ChallengeType::CoinsRun | ChallengeType::ScoreRun => 0,
    }
}

/// Per-run counter behind a run-scoped challenge; cumulative kinds have none
pub fn get_run_value(kind: ChallengeType, run: &RunSummary) -> u64 {
    match kind {
        ChallengeType::NearMissRun => run.near_misses as u64,
        ChallengeType::CoinsRun => run.coins as u64,
        ChallengeType::ScoreRun => run.score,
        _ => 0,
    }
}

/// Fold a finished run into the group's progress.
///
/// Run-scoped challenges keep their best single run. Cumulative ones count
/// from `baseline`, the lifetime stats captured when the group became active.
pub fn update_progress(
    challenges: &[Challenge],
    progress: &mut ChallengeProgress,
    run: &RunSummary,
    lifetime: &LifetimeStats,
    baseline: &LifetimeStats,
) {
    for challenge in challenges {
        let value = match challenge.scope() {
            ChallengeScope::Run => get_run_value(challenge.kind, run),
            ChallengeScope::Cumulative => get_lifetime_value(challenge.kind, lifetime)
                .saturating_sub(get_lifetime_value(challenge.kind, baseline)),
        };
        let entry = progress.entry(challenge.id.clone()).or_insert(0);
        *entry = match challenge.scope() {
            ChallengeScope::Run => (*entry).max(value),
            ChallengeScope::Cumulative => value,
        };
    }
}

/// Every challenge in the group has reached its target
pub fn is_group_complete(challenges: &[Challenge], progress: &ChallengeProgress) -> bool {
    challenges.iter().all(|c| c.is_complete(progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ids_follow_group() {
        let [a, b] = get_challenges_for_group(12, 0);
        assert_eq!(a.id, "group_12_challenge_0");
        assert_eq!(b.id, "group_12_challenge_1");
    }

    #[test]
    fn test_group_zero_targets_are_minimums() {
        for kind in ChallengeType::ALL {
            assert_eq!(kind.target_for_group(0), kind.target_rule().min);
        }
    }

    #[test]
    fn test_targets_scale_then_clamp() {
        assert_eq!(ChallengeType::ScoreRun.target_for_group(10), 3500);
        assert_eq!(ChallengeType::NearMissRun.target_for_group(3), 4); // 3.5 rounds up
        assert_eq!(ChallengeType::ScoreRun.target_for_group(10_000), 15_000);
        assert_eq!(ChallengeType::GamesPlayed.target_for_group(u32::MAX), 50);
    }

    #[test]
    fn test_scopes() {
        let run: Vec<_> = ChallengeType::ALL
            .iter()
            .filter(|k| k.scope() == ChallengeScope::Run)
            .collect();
        assert_eq!(run.len(), 3);
    }

    #[test]
    fn test_shuffle_seed_changes_selection() {
        let base = get_challenges_for_group(4, 0);
        let base_kinds = (base[0].kind, base[1].kind);
        let changed = (1..200).any(|seed| {
            let other = get_challenges_for_group(4, seed);
            (other[0].kind, other[1].kind) != base_kinds
        });
        assert!(changed);
    }

    #[test]
    fn test_initial_progress_is_zero() {
        let progress = get_initial_progress_for_group(3, 77);
        assert_eq!(progress.len(), 2);
        assert!(progress.values().all(|&v| v == 0));
        assert!(progress.contains_key("group_3_challenge_0"));
        assert!(progress.contains_key("group_3_challenge_1"));
    }

    #[test]
    fn test_lifetime_value_only_for_cumulative() {
        let stats = LifetimeStats {
            total_coins: 10,
            total_score: 20,
            games_played: 3,
            total_near_misses: 4,
        };
        assert_eq!(get_lifetime_value(ChallengeType::CoinsTotal, &stats), 10);
        assert_eq!(get_lifetime_value(ChallengeType::ScoreTotal, &stats), 20);
        assert_eq!(get_lifetime_value(ChallengeType::GamesPlayed, &stats), 3);
        assert_eq!(get_lifetime_value(ChallengeType::NearMissTotal, &stats), 4);
        assert_eq!(get_lifetime_value(ChallengeType::ScoreRun, &stats), 0);
        assert_eq!(get_lifetime_value(ChallengeType::CoinsRun, &stats), 0);
        assert_eq!(get_lifetime_value(ChallengeType::NearMissRun, &stats), 0);
    }

    #[test]
    fn test_update_progress_run_and_cumulative() {
        let challenges = vec![
            Challenge {
                id: "a".into(),
                kind: ChallengeType::ScoreRun,
                target: 500,
                description_key: String::new(),
            },
            Challenge {
                id: "b".into(),
                kind: ChallengeType::CoinsTotal,
                target: 20,
                description_key: String::new(),
            },
        ];
        let mut progress = ChallengeProgress::new();
        let baseline = LifetimeStats {
            total_coins: 100,
            ..Default::default()
        };

        let good_run = RunSummary {
            score: 600,
            coins: 5,
            near_misses: 0,
        };
        let mut lifetime = LifetimeStats {
            total_coins: 105,
            ..Default::default()
        };
        update_progress(&challenges, &mut progress, &good_run, &lifetime, &baseline);
        assert_eq!(progress["a"], 600);
        assert_eq!(progress["b"], 5);
        assert!(!is_group_complete(&challenges, &progress));

        // A worse run does not lower the best
        let bad_run = RunSummary {
            score: 100,
            coins: 20,
            near_misses: 0,
        };
        lifetime.total_coins = 125;
        update_progress(&challenges, &mut progress, &bad_run, &lifetime, &baseline);
        assert_eq!(progress["a"], 600);
        assert_eq!(progress["b"], 25);
        assert!(is_group_complete(&challenges, &progress));
    }

    proptest! {
        #[test]
        fn prop_deterministic_distinct_in_range(
            group in 0u32..5_000,
            seed in -100_000i64..100_000
        ) {
            let first = get_challenges_for_group(group, seed);
            let second = get_challenges_for_group(group, seed);
            prop_assert_eq!(&first, &second);
            prop_assert_ne!(first[0].kind, first[1].kind);
            for c in &first {
                let rule = c.kind.target_rule();
                prop_assert!(c.target >= rule.min && c.target <= rule.max);
            }
        }
    }
}
