//! Boost classification
//!
//! A card's boost is decided in a fixed order, first match wins:
//!
//! 1. An explicit `boost` field with any non-zero value is used as written.
//! 2. A non-Support card whose ability text carries a `NN%` token grants
//!    exactly that percentage, in a mode picked from the text.
//! 3. Otherwise the mode is inferred from ability keywords (or defaults to HP
//!    for Support cards) and the magnitude comes from rank and stage.
//!
//! Keyword lists are ordered tables so precedence can be read and tested
//! directly.

use crate::catalog::record::CardRecord;
use crate::core::types::StatBoost;
use nom::{
    bytes::complete::{take_while, take_while_m_n},
    character::complete::char,
    combinator::map_res,
    sequence::terminated,
    IResult, Parser,
};
use serde::Serialize;

use super::ranges::RangeMode;

/// Which stat(s) a boost applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostMode {
    Attack,
    Hp,
    Both,
    Special,
}

impl BoostMode {
    /// Column of the mode-specific range table
    pub fn range_mode(self) -> RangeMode {
        match self {
            BoostMode::Attack | BoostMode::Hp => RangeMode::Single,
            BoostMode::Both => RangeMode::Both,
            BoostMode::Special => RangeMode::Special,
        }
    }

    /// Spread a magnitude onto the stats this mode covers
    pub fn apply(self, value: i32) -> StatBoost {
        match self {
            BoostMode::Attack => StatBoost::new(value, 0, 0),
            BoostMode::Hp => StatBoost::new(0, value, 0),
            BoostMode::Both => StatBoost::new(value, value, 0),
            BoostMode::Special => StatBoost::new(0, 0, value),
        }
    }
}

/// Audit trail of the classification path that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoostReason {
    #[serde(rename = "explicit boost")]
    ExplicitBoost,
    #[serde(rename = "ability text")]
    AbilityText,
    #[serde(rename = "ability inferred")]
    AbilityInferred,
    #[serde(rename = "support default")]
    SupportDefault,
}

impl BoostReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostReason::ExplicitBoost => "explicit boost",
            BoostReason::AbilityText => "ability text",
            BoostReason::AbilityInferred => "ability inferred",
            BoostReason::SupportDefault => "support default",
        }
    }
}

/// Outcome of classifying one card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Explicit override, used as the final contribution
    Explicit(StatBoost),
    /// Percentage read straight from the ability text
    PercentText { mode: BoostMode, value: u32 },
    /// Mode known, magnitude still to come from rank and stage
    Inferred { mode: BoostMode, reason: BoostReason },
    NoBoost,
}

impl Classification {
    pub fn reason(&self) -> Option<BoostReason> {
        match self {
            Classification::Explicit(_) => Some(BoostReason::ExplicitBoost),
            Classification::PercentText { .. } => Some(BoostReason::AbilityText),
            Classification::Inferred { reason, .. } => Some(*reason),
            Classification::NoBoost => None,
        }
    }
}

/// Keywords that select a mode when any of them appears in lowercased text
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub mode: BoostMode,
}

const fn rule(keywords: &'static [&'static str], mode: BoostMode) -> KeywordRule {
    KeywordRule { keywords, mode }
}

/// Phrases naming attack and HP together
const ATK_AND_HP: &[&str] = &["atk and hp", "attack and hp"];

/// Mode for percent-bearing ability text; no match means HP
pub const PERCENT_TEXT_RULES: &[KeywordRule] = &[
    rule(ATK_AND_HP, BoostMode::Both),
    rule(&["attack", "atk"], BoostMode::Attack),
    rule(&["both"], BoostMode::Both),
    rule(&["special"], BoostMode::Special),
];

/// Mode inferred from ability text without a percentage
pub const INFERRED_RULES: &[KeywordRule] = &[
    rule(&["both", "atk and hp", "attack and hp"], BoostMode::Both),
    rule(&["attack", "atk"], BoostMode::Attack),
    rule(&["special"], BoostMode::Special),
    rule(&["hp", "health"], BoostMode::Hp),
];

/// First rule with a keyword contained in `lowered`
pub fn match_keywords(rules: &[KeywordRule], lowered: &str) -> Option<BoostMode> {
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.mode)
}

fn percent_at(input: &str) -> IResult<&str, u32> {
    map_res(
        terminated(
            take_while_m_n(1, 3, |c: char| c.is_ascii_digit()),
            (take_while(char::is_whitespace), char('%')),
        ),
        str::parse::<u32>,
    )
    .parse(input)
}

/// Leftmost one-to-three digit number followed by optional whitespace and `%`
///
/// In `"1234%"` the token is `234`.
pub fn percent_token(text: &str) -> Option<u32> {
    text.char_indices()
        .find_map(|(i, _)| percent_at(&text[i..]).ok().map(|(_, value)| value))
}

/// Decide how a card boosts its team
pub fn classify(record: &CardRecord) -> Classification {
    if let Some(boost) = record.active_boost() {
        return Classification::Explicit(boost);
    }

    let ability = record.ability_text();
    let is_support = record.is_support();
    let lowered = ability.to_lowercase();

    if !ability.is_empty() && !is_support {
        if let Some(value) = percent_token(ability) {
            let mode = match_keywords(PERCENT_TEXT_RULES, &lowered).unwrap_or(BoostMode::Hp);
            return Classification::PercentText { mode, value };
        }
    }

    if ability.is_empty() && !is_support {
        return Classification::NoBoost;
    }

    match match_keywords(INFERRED_RULES, &lowered) {
        Some(mode) => Classification::Inferred {
            mode,
            reason: BoostReason::AbilityInferred,
        },
        None if is_support => Classification::Inferred {
            mode: BoostMode::Hp,
            reason: BoostReason::SupportDefault,
        },
        None => Classification::NoBoost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::BoostField;

    fn card(card_type: &str, ability: &str) -> CardRecord {
        CardRecord::new("card", "A")
            .with_type(card_type)
            .with_ability(ability)
    }

    #[test]
    fn test_percent_token() {
        assert_eq!(percent_token("Boosts team HP by 12%"), Some(12));
        assert_eq!(percent_token("Boosts by 7 %"), Some(7));
        assert_eq!(percent_token("1234%"), Some(234));
        assert_eq!(percent_token("50% then 20%"), Some(50));
        assert_eq!(percent_token("no numbers"), None);
        assert_eq!(percent_token("12 percent"), None);
        assert_eq!(percent_token("100%"), Some(100));
    }

    #[test]
    fn test_explicit_boost_wins() {
        let record = card("Attack", "Boosts team ATK by 40%").with_boost(BoostField {
            atk: None,
            hp: Some(5),
            special: None,
        });
        assert_eq!(classify(&record), Classification::Explicit(StatBoost::new(0, 5, 0)));
    }

    #[test]
    fn test_zero_boost_falls_through() {
        let record = card("Attack", "Boosts team ATK by 40%").with_boost(BoostField::default());
        assert_eq!(
            classify(&record),
            Classification::PercentText { mode: BoostMode::Attack, value: 40 }
        );
    }

    #[test]
    fn test_percent_text_modes() {
        let cases = [
            ("Boosts team ATK and HP by 12%", BoostMode::Both),
            ("Raises attack by 5%", BoostMode::Attack),
            ("Boosts both stats by 5%", BoostMode::Both),
            ("Special gauge +5%", BoostMode::Special),
            ("Heals 5% each turn", BoostMode::Hp),
            // attack keywords outrank "both"
            ("Boosts attack of both allies by 5%", BoostMode::Attack),
        ];
        for (text, mode) in cases {
            match classify(&card("Attack", text)) {
                Classification::PercentText { mode: found, .. } => assert_eq!(found, mode, "{}", text),
                other => panic!("{}: unexpected {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_support_ignores_percent() {
        let record = card("Support", "Boosts team ATK by 40%");
        assert_eq!(
            classify(&record),
            Classification::Inferred { mode: BoostMode::Attack, reason: BoostReason::AbilityInferred }
        );
    }

    #[test]
    fn test_inferred_modes() {
        let cases = [
            ("Strengthens both stats", BoostMode::Both),
            ("Raises crew attack", BoostMode::Attack),
            ("Charges special meter", BoostMode::Special),
            ("Restores health", BoostMode::Hp),
            ("Boosts ATK and HP", BoostMode::Both),
            // "both" outranks attack keywords here
            ("Boosts attack of both allies", BoostMode::Both),
        ];
        for (text, mode) in cases {
            assert_eq!(
                classify(&card("Attack", text)),
                Classification::Inferred { mode, reason: BoostReason::AbilityInferred },
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_support_default() {
        let record = CardRecord::new("nami", "B").with_type("support");
        assert_eq!(
            classify(&record),
            Classification::Inferred { mode: BoostMode::Hp, reason: BoostReason::SupportDefault }
        );

        let record = card("Support", "Cheers from the sidelines");
        assert_eq!(classify(&record).reason(), Some(BoostReason::SupportDefault));
    }

    #[test]
    fn test_no_boost() {
        assert_eq!(classify(&CardRecord::new("zoro", "SS").with_type("Attack")), Classification::NoBoost);
        assert_eq!(classify(&card("Attack", "   ")), Classification::NoBoost);
        assert_eq!(classify(&card("Attack", "Slices through steel")), Classification::NoBoost);
    }

    #[test]
    fn test_mode_apply() {
        assert_eq!(BoostMode::Both.apply(4), StatBoost::new(4, 4, 0));
        assert_eq!(BoostMode::Special.apply(2), StatBoost::new(0, 0, 2));
        assert_eq!(BoostMode::Hp.range_mode(), RangeMode::Single);
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(
            serde_json::to_string(&BoostReason::SupportDefault).unwrap(),
            "\"support default\""
        );
        assert_eq!(BoostReason::AbilityText.as_str(), "ability text");
    }
}
