//! Trophy system module.
//!
//! A static, ordered table of declarative conditions evaluated against a
//! progress snapshot. The host persists the earned set; evaluation itself
//! keeps no state.

pub mod data;
pub mod types;

pub use data::{
    PLATINUM_ID, TROPHIES, TROPHY_COUNT, evaluate_trophies, get_trophy_def, trophies_by_tier,
    trophy_ids,
};
pub use types::{ProgressSnapshot, TrophyCondition, TrophyDef, TrophyTier};
