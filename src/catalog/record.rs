//! Card records as stored in the catalog

use crate::boost::magnitude::round_half_up;
use crate::core::types::{Rank, StatBoost};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Type label that marks a card as a team booster
pub const SUPPORT_TYPE: &str = "Support";

/// Any JSON number, rounded half up and saturated to `i32`
///
/// Non-numeric values are ignored rather than failing the whole record.
fn lenient_stat<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .map(|number| round_half_up(number) as i32))
}

/// Explicit structured boost written on a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostField {
    #[serde(default, deserialize_with = "lenient_stat", skip_serializing_if = "Option::is_none")]
    pub atk: Option<i32>,
    #[serde(default, deserialize_with = "lenient_stat", skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, deserialize_with = "lenient_stat", skip_serializing_if = "Option::is_none")]
    pub special: Option<i32>,
}

impl BoostField {
    /// Missing sub-fields count as zero
    pub fn to_stat_boost(&self) -> StatBoost {
        StatBoost {
            atk: self.atk.unwrap_or(0),
            hp: self.hp.unwrap_or(0),
            special: self.special.unwrap_or(0),
        }
    }

    /// An override only takes effect when some sub-field is non-zero
    pub fn is_active(&self) -> bool {
        !self.to_stat_boost().is_zero()
    }
}

/// One card in the catalog
///
/// Fields other than these are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub boost: Option<BoostField>,
}

impl CardRecord {
    pub fn new(id: impl Into<String>, rank: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rank: Some(rank.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    pub fn with_boost(mut self, boost: BoostField) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Parsed rank tier; unknown or missing labels yield `None`
    pub fn rank_tier(&self) -> Option<Rank> {
        self.rank.as_deref().and_then(Rank::parse)
    }

    /// Support typing as the evaluator sees it (case-insensitive)
    pub fn is_support(&self) -> bool {
        self.card_type
            .as_deref()
            .is_some_and(|t| t.to_lowercase() == SUPPORT_TYPE.to_lowercase())
    }

    /// Support typing as the catalog tools see it (exact match)
    pub fn is_listed_support(&self) -> bool {
        self.card_type.as_deref() == Some(SUPPORT_TYPE)
    }

    /// Ability text with surrounding whitespace removed, empty when absent
    pub fn ability_text(&self) -> &str {
        self.ability.as_deref().unwrap_or("").trim()
    }

    /// The explicit boost when it carries a non-zero value
    pub fn active_boost(&self) -> Option<StatBoost> {
        self.boost
            .filter(BoostField::is_active)
            .map(|b| b.to_stat_boost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let record: CardRecord = serde_json::from_value(json!({
            "id": "usopp_02",
            "name": "Usopp",
            "rank": "B",
            "type": "Support",
            "ability": null,
            "image": "https://example.invalid/usopp.png",
            "evolutions": ["usopp_03"],
        }))
        .unwrap();

        assert_eq!(record.id, "usopp_02");
        assert_eq!(record.rank_tier(), Some(Rank::B));
        assert!(record.is_support());
        assert!(record.is_listed_support());
        assert_eq!(record.ability, None);
        assert_eq!(record.boost, None);
    }

    #[test]
    fn test_support_match_case() {
        let record = CardRecord::new("a", "C").with_type("SUPPORT");
        assert!(record.is_support());
        assert!(!record.is_listed_support());

        let record = CardRecord::new("a", "C").with_type("Supporter");
        assert!(!record.is_support());
    }

    #[test]
    fn test_fractional_boost_rounds_half_up() {
        let record: CardRecord = serde_json::from_value(json!({
            "id": "brook",
            "rank": "UR",
            "boost": { "hp": 12.5, "atk": 3.2, "special": "lots" },
        }))
        .unwrap();
        // Unreadable sub-fields are dropped, the record still loads
        assert_eq!(record.active_boost(), Some(StatBoost::new(3, 13, 0)));
        assert_eq!(record.rank_tier(), Some(Rank::UR));
    }

    #[test]
    fn test_partial_boost_field() {
        let record: CardRecord =
            serde_json::from_value(json!({ "id": "a", "boost": { "hp": 7 } })).unwrap();
        assert_eq!(record.active_boost(), Some(StatBoost::new(0, 7, 0)));
    }

    #[test]
    fn test_zero_boost_is_inactive() {
        let record = CardRecord::new("a", "S").with_boost(BoostField {
            atk: Some(0),
            hp: None,
            special: Some(0),
        });
        assert_eq!(record.active_boost(), None);
    }

    #[test]
    fn test_ability_text_trimmed() {
        let record = CardRecord::new("a", "S").with_ability("  Boosts HP  ");
        assert_eq!(record.ability_text(), "Boosts HP");
        assert_eq!(CardRecord::new("b", "S").ability_text(), "");
    }
}
