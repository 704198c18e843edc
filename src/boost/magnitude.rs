//! Stage-aware boost magnitudes
//!
//! Single-stage lineages take the midpoint of their range. In multi-stage
//! lineages the value is interpolated by `stage / max_stage`; the live
//! evaluator then adds one and clamps to the range maximum, the patcher does
//! not. Rounding is half-up throughout.

use crate::boost::ranges::{range_for, BoostRange, RangeMode};
use crate::core::types::Rank;

/// Round half up: 10.5 becomes 11
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn midpoint(range: BoostRange) -> u32 {
    round_half_up(f64::from(range.min + range.max) / 2.0) as u32
}

fn interpolate(range: BoostRange, stage: u32, max_stage: u32) -> u32 {
    let fraction = f64::from(stage) / f64::from(max_stage);
    round_half_up(f64::from(range.min) + f64::from(range.max - range.min) * fraction) as u32
}

/// Magnitude used by the live evaluator
pub fn stage_magnitude(range: BoostRange, stage: u32, max_stage: u32) -> u32 {
    if max_stage <= 1 {
        return midpoint(range);
    }
    let computed = interpolate(range, stage, max_stage);
    computed.saturating_add(1).min(range.max)
}

/// Magnitude the catalog patcher writes (no nudge above the interpolation)
pub fn canonical_magnitude(range: BoostRange, stage: u32, max_stage: u32) -> u32 {
    if max_stage <= 1 {
        midpoint(range)
    } else {
        interpolate(range, stage, max_stage)
    }
}

/// Table lookup plus [`stage_magnitude`]; `None` when the rank grants nothing in this mode
pub fn magnitude(rank: Rank, mode: RangeMode, stage: u32, max_stage: u32) -> Option<u32> {
    range_for(rank, mode).map(|range| stage_magnitude(range, stage, max_stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rounding_convention() {
        assert_eq!(round_half_up(10.5), 11.0);
        assert_eq!(round_half_up(10.49), 10.0);
        assert_eq!(round_half_up(11.5), 12.0);
        assert_eq!(round_half_up(3.0), 3.0);
    }

    #[test]
    fn test_rank_a_single_stage_two_of_four() {
        // 1 + 19 * 0.5 = 10.5 -> 11, nudged to 12
        assert_eq!(magnitude(Rank::A, RangeMode::Single, 2, 4), Some(12));
    }

    #[test]
    fn test_single_stage_lineage_midpoint() {
        // (1 + 20) / 2 = 10.5 -> 11, whatever the stage argument
        assert_eq!(magnitude(Rank::S, RangeMode::Both, 1, 1), Some(11));
        assert_eq!(magnitude(Rank::S, RangeMode::Both, 7, 1), Some(11));
        assert_eq!(magnitude(Rank::S, RangeMode::Both, 0, 0), Some(11));
    }

    #[test]
    fn test_final_stage_clamped() {
        // 1 + 29 * 1.0 = 30, +1 clamps back to 30
        assert_eq!(magnitude(Rank::S, RangeMode::Single, 3, 3), Some(30));
    }

    #[test]
    fn test_first_of_three() {
        // 1 + 9 * (1/3) = 4.0 -> 4, nudged to 5
        assert_eq!(magnitude(Rank::C, RangeMode::Single, 1, 3), Some(5));
    }

    #[test]
    fn test_no_range_no_magnitude() {
        assert_eq!(magnitude(Rank::C, RangeMode::Special, 1, 1), None);
    }

    #[test]
    fn test_canonical_skips_nudge() {
        let range = BoostRange::new(1, 20);
        assert_eq!(canonical_magnitude(range, 2, 4), 11);
        assert_eq!(canonical_magnitude(range, 4, 4), 20);
        assert_eq!(canonical_magnitude(range, 1, 1), 11);
        assert_eq!(canonical_magnitude(BoostRange::new(1, 10), 1, 1), 6);
    }

    fn ranges() -> impl Strategy<Value = BoostRange> {
        (1u32..20, 0u32..60).prop_map(|(min, width)| BoostRange::new(min, min + width))
    }

    proptest! {
        #[test]
        fn prop_stage_magnitude_within_range(range in ranges(), max_stage in 1u32..12, pick in 0u32..12) {
            let stage = 1 + pick % max_stage;
            let value = stage_magnitude(range, stage, max_stage);
            prop_assert!(range.contains(value));
        }

        #[test]
        fn prop_nudge_is_at_most_one(range in ranges(), max_stage in 2u32..12, pick in 0u32..12) {
            let stage = 1 + pick % max_stage;
            let live = stage_magnitude(range, stage, max_stage);
            let canonical = canonical_magnitude(range, stage, max_stage);
            prop_assert!(live == canonical + 1 || (live == canonical && live == range.max));
        }

        #[test]
        fn prop_later_stages_never_weaker(range in ranges(), max_stage in 2u32..12, pick in 0u32..11) {
            let stage = 1 + pick % (max_stage - 1);
            prop_assert!(stage_magnitude(range, stage, max_stage) <= stage_magnitude(range, stage + 1, max_stage));
        }

        #[test]
        fn prop_single_stage_ignores_stage(range in ranges(), stage in 0u32..20) {
            prop_assert_eq!(stage_magnitude(range, stage, 1), stage_magnitude(range, 1, 1));
        }
    }
}
