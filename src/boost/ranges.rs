//! Rank-range tables
//!
//! Two tables exist. The live evaluator uses the mode-specific table; the
//! catalog patcher assigns canonical values from a single range per rank.
//! They disagree for `both` and `special` and are kept separate on purpose.

use crate::core::types::Rank;
use serde::Serialize;

/// Column of the mode-specific table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    /// Attack-only or HP-only
    Single,
    Both,
    Special,
}

/// Inclusive bounds for a boost percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoostRange {
    pub min: u32,
    pub max: u32,
}

impl BoostRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Mode-specific ranges per rank: `[single, both, special]`
const MODE_RANGES: [(Rank, [Option<BoostRange>; 3]); 6] = [
    (Rank::C, [Some(BoostRange::new(1, 10)), Some(BoostRange::new(1, 8)), None]),
    (Rank::B, [Some(BoostRange::new(1, 15)), Some(BoostRange::new(1, 12)), None]),
    (
        Rank::A,
        [Some(BoostRange::new(1, 20)), Some(BoostRange::new(1, 15)), Some(BoostRange::new(1, 5))],
    ),
    (
        Rank::S,
        [Some(BoostRange::new(1, 30)), Some(BoostRange::new(1, 20)), Some(BoostRange::new(1, 8))],
    ),
    (
        Rank::SS,
        [Some(BoostRange::new(1, 40)), Some(BoostRange::new(1, 25)), Some(BoostRange::new(1, 10))],
    ),
    (
        Rank::UR,
        [Some(BoostRange::new(1, 50)), Some(BoostRange::new(1, 25)), Some(BoostRange::new(1, 15))],
    ),
];

/// Range used by the patcher when a rank label is not recognised
pub const CANONICAL_FALLBACK: BoostRange = BoostRange::new(1, 10);

/// Mode-specific range for a rank; `None` means the pair grants nothing
pub fn range_for(rank: Rank, mode: RangeMode) -> Option<BoostRange> {
    let column = match mode {
        RangeMode::Single => 0,
        RangeMode::Both => 1,
        RangeMode::Special => 2,
    };
    MODE_RANGES
        .iter()
        .find(|(r, _)| *r == rank)
        .and_then(|(_, ranges)| ranges[column])
}

/// [`range_for`] on a raw rank label
pub fn range_for_label(label: &str, mode: RangeMode) -> Option<BoostRange> {
    Rank::parse(label).and_then(|rank| range_for(rank, mode))
}

/// Single range per rank used by the catalog patcher, whatever the mode
pub fn canonical_range(rank: Option<Rank>) -> BoostRange {
    match rank {
        Some(rank) => range_for(rank, RangeMode::Single).unwrap_or(CANONICAL_FALLBACK),
        None => CANONICAL_FALLBACK,
    }
}
