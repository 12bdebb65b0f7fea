//! Static trophy definitions and the evaluator.

use super::types::{ProgressSnapshot, TrophyCondition, TrophyDef, TrophyTier};

use TrophyCondition::*;
use TrophyTier::*;

pub const TROPHY_COUNT: usize = 46;

/// Id of the meta trophy earned by collecting every other one
pub const PLATINUM_ID: &str = "platinum";

const fn trophy(
    order: u32,
    id: &'static str,
    tier: TrophyTier,
    condition: TrophyCondition,
) -> TrophyDef {
    TrophyDef {
        id,
        tier,
        order,
        condition,
    }
}

/// All trophy definitions in display order.
pub static TROPHIES: [TrophyDef; TROPHY_COUNT] = [
    // ═══════════════════════════════════════════════════════════════
    // GAMES PLAYED
    // ═══════════════════════════════════════════════════════════════
    trophy(1, "first_run", Bronze, GamesPlayed(1)),
    trophy(2, "games_10", Bronze, GamesPlayed(10)),
    trophy(3, "games_50", Silver, GamesPlayed(50)),
    trophy(4, "games_100", Gold, GamesPlayed(100)),
    trophy(5, "games_500", Diamond, GamesPlayed(500)),
    // ═══════════════════════════════════════════════════════════════
    // HIGH SCORE
    // ═══════════════════════════════════════════════════════════════
    trophy(6, "score_100", Bronze, HighScore(100)),
    trophy(7, "score_500", Bronze, HighScore(500)),
    trophy(8, "score_1000", Silver, HighScore(1_000)),
    trophy(9, "score_2500", Silver, HighScore(2_500)),
    trophy(10, "score_5000", Gold, HighScore(5_000)),
    trophy(11, "score_10000", Diamond, HighScore(10_000)),
    trophy(12, "score_25000", Legendary, HighScore(25_000)),
    // ═══════════════════════════════════════════════════════════════
    // LIFETIME SCORE
    // ═══════════════════════════════════════════════════════════════
    trophy(13, "total_score_10k", Bronze, TotalScore(10_000)),
    trophy(14, "total_score_50k", Silver, TotalScore(50_000)),
    trophy(15, "total_score_250k", Gold, TotalScore(250_000)),
    trophy(16, "total_score_1m", Legendary, TotalScore(1_000_000)),
    // ═══════════════════════════════════════════════════════════════
    // COINS
    // ═══════════════════════════════════════════════════════════════
    trophy(17, "coins_50", Bronze, TotalCoins(50)),
    trophy(18, "coins_250", Silver, TotalCoins(250)),
    trophy(19, "coins_1000", Gold, TotalCoins(1_000)),
    trophy(20, "coins_5000", Diamond, TotalCoins(5_000)),
    trophy(21, "bank_100", Bronze, BankedCoins(100)),
    trophy(22, "bank_500", Silver, BankedCoins(500)),
    trophy(23, "bank_2000", Gold, BankedCoins(2_000)),
    // ═══════════════════════════════════════════════════════════════
    // NEAR-MISSES
    // ═══════════════════════════════════════════════════════════════
    trophy(24, "near_miss_10", Bronze, TotalNearMisses(10)),
    trophy(25, "near_miss_100", Silver, TotalNearMisses(100)),
    trophy(26, "near_miss_500", Gold, TotalNearMisses(500)),
    trophy(27, "near_miss_2000", Diamond, TotalNearMisses(2_000)),
    trophy(28, "run_near_miss_5", Bronze, RunNearMisses(5)),
    trophy(29, "run_near_miss_15", Silver, RunNearMisses(15)),
    trophy(30, "run_near_miss_30", Gold, RunNearMisses(30)),
    // ═══════════════════════════════════════════════════════════════
    // SINGLE RUN COINS
    // ═══════════════════════════════════════════════════════════════
    trophy(31, "run_coins_10", Bronze, RunCoins(10)),
    trophy(32, "run_coins_25", Silver, RunCoins(25)),
    trophy(33, "run_coins_50", Gold, RunCoins(50)),
    // ═══════════════════════════════════════════════════════════════
    // COLLECTION
    // ═══════════════════════════════════════════════════════════════
    trophy(34, "skins_2", Bronze, SkinsUnlocked(2)),
    trophy(35, "skins_5", Silver, SkinsUnlocked(5)),
    trophy(36, "skins_10", Gold, SkinsUnlocked(10)),
    trophy(37, "skin_golden", Diamond, SkinOwned("golden")),
    trophy(38, "multiplier_2", Silver, ScoreMultiplier(2)),
    trophy(39, "multiplier_3", Gold, ScoreMultiplier(3)),
    trophy(40, "multiplier_5", Diamond, ScoreMultiplier(5)),
    // ═══════════════════════════════════════════════════════════════
    // CHALLENGES
    // ═══════════════════════════════════════════════════════════════
    trophy(41, "challenge_group_1", Bronze, ChallengeGroup(1)),
    trophy(42, "challenge_group_5", Silver, ChallengeGroup(5)),
    trophy(43, "challenge_group_10", Gold, ChallengeGroup(10)),
    trophy(44, "challenge_group_25", Diamond, ChallengeGroup(25)),
    trophy(45, "challenge_group_50", Legendary, ChallengeGroup(50)),
    // ═══════════════════════════════════════════════════════════════
    // META
    // ═══════════════════════════════════════════════════════════════
    trophy(46, PLATINUM_ID, Platinum, AllOthersEarned),
];

/// Ids of trophies not yet earned whose condition now holds, in table order.
///
/// Already-earned ids are never reported again, so repeated calls with the
/// same snapshot return nothing new once the host stores the result.
pub fn evaluate_trophies(snapshot: &ProgressSnapshot) -> Vec<&'static str> {
    TROPHIES
        .iter()
        .filter(|t| !snapshot.earned.contains(t.id))
        .filter(|t| t.condition.is_met(snapshot, &TROPHIES))
        .map(|t| t.id)
        .collect()
}

/// Get definition for a trophy id.
pub fn get_trophy_def(id: &str) -> Option<&'static TrophyDef> {
    TROPHIES.iter().find(|t| t.id == id)
}

/// All trophy ids in display order.
pub fn trophy_ids() -> Vec<&'static str> {
    TROPHIES.iter().map(|t| t.id).collect()
}

/// Trophies of one tier, in display order.
pub fn trophies_by_tier(tier: TrophyTier) -> Vec<&'static TrophyDef> {
    TROPHIES.iter().filter(|t| t.tier == tier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    fn non_platinum_ids() -> Vec<&'static str> {
        trophy_ids()
            .into_iter()
            .filter(|&id| id != PLATINUM_ID)
            .collect()
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(TROPHIES.len(), 46);

        let ids: BTreeSet<_> = TROPHIES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), TROPHY_COUNT);

        let mut orders: Vec<u32> = TROPHIES.iter().map(|t| t.order).collect();
        orders.sort();
        assert_eq!(orders, (1..=46).collect::<Vec<_>>());

        let platinum = get_trophy_def(PLATINUM_ID).unwrap();
        assert_eq!(platinum.order, 46);
        assert_eq!(trophies_by_tier(TrophyTier::Platinum).len(), 1);
    }

    #[test]
    fn test_every_tier_is_used() {
        let total: usize = TrophyTier::ALL
            .iter()
            .map(|&tier| trophies_by_tier(tier).len())
            .sum();
        assert_eq!(total, TROPHY_COUNT);
        for tier in TrophyTier::ALL {
            assert!(!trophies_by_tier(tier).is_empty(), "{} is empty", tier.name());
        }
        assert_eq!(TrophyTier::Legendary.name(), "Legendary");
        assert!(TrophyTier::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_snapshot_earns_nothing() {
        assert!(evaluate_trophies(&ProgressSnapshot::default()).is_empty());
    }

    #[test]
    fn test_results_keep_table_order() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.lifetime.games_played = 10;
        snapshot.high_score = 600;
        assert_eq!(
            evaluate_trophies(&snapshot),
            vec!["first_run", "games_10", "score_100", "score_500"]
        );
    }

    #[test]
    fn test_earned_not_reported_again() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.lifetime.games_played = 1;
        assert_eq!(evaluate_trophies(&snapshot), vec!["first_run"]);
        snapshot.earned.insert("first_run".to_string());
        assert!(evaluate_trophies(&snapshot).is_empty());
    }

    #[test]
    fn test_platinum_needs_all_45() {
        let others = non_platinum_ids();
        assert_eq!(others.len(), 45);

        let mut snapshot = ProgressSnapshot::default();
        snapshot.earned = others.iter().map(|id| id.to_string()).collect();
        assert_eq!(evaluate_trophies(&snapshot), vec![PLATINUM_ID]);

        for missing in &others {
            let mut partial = snapshot.clone();
            partial.earned.remove(*missing);
            assert!(!evaluate_trophies(&partial).contains(&PLATINUM_ID));
        }
    }

    #[test]
    fn test_skin_conditions() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot.unlocked_skins = ["default", "golden"].iter().map(|s| s.to_string()).collect();
        let earned = evaluate_trophies(&snapshot);
        assert!(earned.contains(&"skins_2"));
        assert!(earned.contains(&"skin_golden"));
        assert!(!earned.contains(&"skins_5"));
    }

    #[test]
    fn test_run_and_bank_conditions() {
        let snapshot = ProgressSnapshot {
            coins: 500,
            run_coins: 25,
            run_near_misses: 5,
            score_multiplier: 3,
            challenge_group: 5,
            ..Default::default()
        };
        let earned = evaluate_trophies(&snapshot);
        for id in [
            "bank_100",
            "bank_500",
            "run_coins_10",
            "run_coins_25",
            "run_near_miss_5",
            "multiplier_2",
            "multiplier_3",
            "challenge_group_1",
            "challenge_group_5",
        ] {
            assert!(earned.contains(&id), "{id} should be earned");
        }
        assert!(!earned.contains(&"bank_2000"));
        assert!(!earned.contains(&"multiplier_5"));
    }

    proptest! {
        #[test]
        fn prop_platinum_only_with_every_other(
            mask in proptest::collection::vec(any::<bool>(), 45)
        ) {
            let others = non_platinum_ids();
            let earned: BTreeSet<String> = others
                .iter()
                .zip(&mask)
                .filter(|(_, keep)| **keep)
                .map(|(id, _)| id.to_string())
                .collect();
            let all = earned.len() == 45;
            let snapshot = ProgressSnapshot { earned, ..Default::default() };
            prop_assert_eq!(evaluate_trophies(&snapshot).contains(&PLATINUM_ID), all);
        }
    }
}
