//! Boost inference: range tables, classification, magnitudes and team totals

pub mod classify;
pub mod magnitude;
pub mod ranges;
pub mod team;

pub use classify::{
    classify, match_keywords, percent_token, BoostMode, BoostReason, Classification, KeywordRule,
    INFERRED_RULES, PERCENT_TEXT_RULES,
};
pub use magnitude::{canonical_magnitude, magnitude, round_half_up, stage_magnitude};
pub use ranges::{canonical_range, range_for, range_for_label, BoostRange, RangeMode};
pub use team::{Contribution, ContributionEntry, TeamEvaluator, TeamReport};
