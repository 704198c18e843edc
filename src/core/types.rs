//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Card quality tier, ordered low to high
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rank {
    C,
    B,
    A,
    S,
    SS,
    UR,
}

impl Rank {
    /// Every tier, lowest first
    pub const ALL: [Rank; 6] = [Rank::C, Rank::B, Rank::A, Rank::S, Rank::SS, Rank::UR];

    /// Parse a rank label, ignoring case. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "C" => Some(Rank::C),
            "B" => Some(Rank::B),
            "A" => Some(Rank::A),
            "S" => Some(Rank::S),
            "SS" => Some(Rank::SS),
            "UR" => Some(Rank::UR),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
            Rank::UR => "UR",
        }
    }
}


/// Attack / HP / special percentages granted to a team
///
/// Values are non-negative by convention only; explicit catalog overrides
/// are summed as written, saturating at the `i32` bounds.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display(fmt = "ATK +{}% / HP +{}% / SPECIAL +{}%", atk, hp, special)]
pub struct StatBoost {
    pub atk: i32,
    pub hp: i32,
    pub special: i32,
}

impl StatBoost {
    pub const ZERO: StatBoost = StatBoost {
        atk: 0,
        hp: 0,
        special: 0,
    };

    pub fn new(atk: i32, hp: i32, special: i32) -> Self {
        Self { atk, hp, special }
    }

    pub fn is_zero(&self) -> bool {
        self.atk == 0 && self.hp == 0 && self.special == 0
    }
}

impl Add for StatBoost {
    type Output = StatBoost;

    fn add(self, other: StatBoost) -> StatBoost {
        StatBoost {
            atk: self.atk.saturating_add(other.atk),
            hp: self.hp.saturating_add(other.hp),
            special: self.special.saturating_add(other.special),
        }
    }
}

impl AddAssign for StatBoost {
    fn add_assign(&mut self, other: StatBoost) {
        *self = *self + other;
    }
}
