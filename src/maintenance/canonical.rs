//! Canonical boost for a Support record
//!
//! This is what the patcher writes and what the drift validator expects to
//! find. An ability that already names a percentage is kept verbatim and
//! only its structured boost is derived; otherwise a fresh ability string is
//! generated from the single-range table and the stage formula without the
//! live evaluator's +1 nudge.

use crate::boost::classify::{match_keywords, percent_token, BoostMode, KeywordRule, PERCENT_TEXT_RULES};
use crate::boost::magnitude::canonical_magnitude;
use crate::boost::ranges::canonical_range;
use crate::catalog::{CardRecord, LineageIndex};
use crate::core::types::StatBoost;
use serde::Serialize;

/// Mode picked for abilities without a percentage; no match means HP
pub const PATCH_RULES: &[KeywordRule] = &[
    KeywordRule { keywords: &["attack"], mode: BoostMode::Attack },
    KeywordRule { keywords: &["special"], mode: BoostMode::Special },
    KeywordRule { keywords: &["both"], mode: BoostMode::Both },
    KeywordRule { keywords: &["hp", "health"], mode: BoostMode::Hp },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalSource {
    /// Ability already carried a percentage and is left as written
    KeptPercent,
    /// Ability string generated from rank and stage
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalBoost {
    pub ability: String,
    pub mode: BoostMode,
    pub value: u32,
    pub source: CanonicalSource,
}

impl CanonicalBoost {
    pub fn boost(&self) -> StatBoost {
        self.mode.apply(i32::try_from(self.value).unwrap_or(i32::MAX))
    }
}

/// Ability sentence for a generated boost
pub fn describe(mode: BoostMode, value: u32) -> String {
    match mode {
        BoostMode::Both => format!("Boosts team ATK and HP by {}%", value),
        BoostMode::Attack => format!("Boosts team ATK by {}%", value),
        BoostMode::Special => format!("Boosts team SPECIAL by {}%", value),
        BoostMode::Hp => format!("Boosts team HP by {}%", value),
    }
}

/// Boost object literal in the record's key style
pub fn render_boost(mode: BoostMode, value: u32, quoted_keys: bool) -> String {
    let key = |name: &str| {
        if quoted_keys {
            format!("\"{}\"", name)
        } else {
            name.to_string()
        }
    };
    match mode {
        BoostMode::Both => format!("{{ {}: {}, {}: {} }}", key("atk"), value, key("hp"), value),
        BoostMode::Attack => format!("{{ {}: {} }}", key("atk"), value),
        BoostMode::Special => format!("{{ {}: {} }}", key("special"), value),
        BoostMode::Hp => format!("{{ {}: {} }}", key("hp"), value),
    }
}

pub fn canonical_boost(record: &CardRecord, lineage: &LineageIndex) -> CanonicalBoost {
    let ability = record.ability.as_deref().unwrap_or("");
    let lowered = ability.to_lowercase();

    if let Some(value) = percent_token(ability) {
        let mode = match_keywords(PERCENT_TEXT_RULES, &lowered).unwrap_or(BoostMode::Hp);
        return CanonicalBoost {
            ability: ability.to_string(),
            mode,
            value,
            source: CanonicalSource::KeptPercent,
        };
    }

    let mode = match_keywords(PATCH_RULES, &lowered).unwrap_or(BoostMode::Hp);
    let position = lineage.position(&record.id);
    let value = canonical_magnitude(
        canonical_range(record.rank_tier()),
        position.stage,
        position.max_stage,
    );

    CanonicalBoost {
        ability: describe(mode, value),
        mode,
        value,
        source: CanonicalSource::Generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineage() -> LineageIndex {
        LineageIndex::from_ids(["kaya", "vivi_01", "vivi_02", "vivi_03", "vivi_04"])
    }

    #[test]
    fn test_generated_hp_default() {
        let record = CardRecord::new("kaya", "C").with_type("Support");
        let canonical = canonical_boost(&record, &lineage());
        // C single range 1..10, one stage -> 5.5 -> 6
        assert_eq!(canonical.value, 6);
        assert_eq!(canonical.ability, "Boosts team HP by 6%");
        assert_eq!(canonical.boost(), StatBoost::new(0, 6, 0));
        assert_eq!(canonical.source, CanonicalSource::Generated);
    }

    #[test]
    fn test_generated_uses_single_range_for_both() {
        let record = CardRecord::new("vivi_02", "S")
            .with_type("Support")
            .with_ability("Inspires both lines");
        let canonical = canonical_boost(&record, &lineage());
        // S single range 1..30, 1 + 29 * 0.5 = 15.5 -> 16, no nudge
        assert_eq!(canonical.mode, BoostMode::Both);
        assert_eq!(canonical.value, 16);
        assert_eq!(canonical.ability, "Boosts team ATK and HP by 16%");
    }

    #[test]
    fn test_patch_keyword_order() {
        let lineage = lineage();
        let record = CardRecord::new("kaya", "C")
            .with_type("Support")
            .with_ability("special attack support");
        assert_eq!(canonical_boost(&record, &lineage).mode, BoostMode::Attack);

        // "atk" alone is not a patch keyword
        let record = CardRecord::new("kaya", "C").with_type("Support").with_ability("atk up");
        assert_eq!(canonical_boost(&record, &lineage).mode, BoostMode::Hp);
    }

    #[test]
    fn test_kept_percent() {
        let record = CardRecord::new("vivi_04", "UR")
            .with_type("Support")
            .with_ability("Raises crew attack by 7 %");
        let canonical = canonical_boost(&record, &lineage());
        assert_eq!(canonical.source, CanonicalSource::KeptPercent);
        assert_eq!(canonical.ability, "Raises crew attack by 7 %");
        assert_eq!(canonical.boost(), StatBoost::new(7, 0, 0));
    }

    #[test]
    fn test_generated_text_round_trips() {
        for mode in [BoostMode::Attack, BoostMode::Hp, BoostMode::Both, BoostMode::Special] {
            let record = CardRecord::new("kaya", "A")
                .with_type("Support")
                .with_ability(describe(mode, 9));
            let canonical = canonical_boost(&record, &lineage());
            assert_eq!(canonical.mode, mode);
            assert_eq!(canonical.value, 9);
        }
    }

    #[test]
    fn test_render_boost() {
        assert_eq!(render_boost(BoostMode::Both, 4, false), "{ atk: 4, hp: 4 }");
        assert_eq!(render_boost(BoostMode::Special, 2, true), "{ \"special\": 2 }");
    }
}
