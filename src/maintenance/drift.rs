//! Catalog drift validation
//!
//! Lists Support records that would be touched by the patcher: records
//! missing their ability or boost field and, for [`find_drift`], records whose
//! persisted values disagree with the canonical boost.

use crate::catalog::{BoostField, Catalog, CardRecord, LineageIndex};
use crate::core::types::StatBoost;
use serde::Serialize;

use super::canonical::canonical_boost;

/// A Support record lacking an ability or a boost field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingBoost {
    /// Position of the record in the catalog, in file order
    pub index: usize,
    pub id: String,
    pub rank: Option<String>,
    pub ability: Option<String>,
    pub boost: Option<BoostField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriftIssue {
    /// Which of the two fields is absent
    MissingFields { ability: bool, boost: bool },
    /// Both present but not what the patcher would write
    Mismatch {
        expected_ability: String,
        expected_boost: StatBoost,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftFinding {
    pub index: usize,
    pub id: String,
    pub rank: Option<String>,
    pub ability: Option<String>,
    pub boost: Option<BoostField>,
    pub issue: DriftIssue,
}

fn ability_missing(record: &CardRecord) -> bool {
    record.ability.as_deref().map_or(true, str::is_empty)
}

/// Support records with no ability text or no boost field
pub fn find_missing(catalog: &Catalog) -> Vec<MissingBoost> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_listed_support())
        .filter(|(_, record)| ability_missing(record) || record.boost.is_none())
        .map(|(index, record)| MissingBoost {
            index,
            id: record.id.clone(),
            rank: record.rank.clone(),
            ability: record.ability.clone(),
            boost: record.boost,
        })
        .collect()
}

/// Missing fields plus Support records out of line with the canonical boost
///
/// Records without a rank are only checked for missing fields, matching what
/// the patcher is able to fix.
pub fn find_drift(catalog: &Catalog, lineage: &LineageIndex) -> Vec<DriftFinding> {
    let mut findings = Vec::new();

    for (index, record) in catalog.iter().enumerate() {
        if !record.is_listed_support() {
            continue;
        }

        let missing_ability = ability_missing(record);
        let missing_boost = record.boost.is_none();

        let issue = if missing_ability || missing_boost {
            DriftIssue::MissingFields {
                ability: missing_ability,
                boost: missing_boost,
            }
        } else if record.rank.is_some() {
            let canonical = canonical_boost(record, lineage);
            let persisted = record.boost.map(|b| b.to_stat_boost());
            if record.ability.as_deref() == Some(canonical.ability.as_str())
                && persisted == Some(canonical.boost())
            {
                continue;
            }
            DriftIssue::Mismatch {
                expected_boost: canonical.boost(),
                expected_ability: canonical.ability,
            }
        } else {
            continue;
        };

        tracing::debug!("Drift on {}: {:?}", record.id, issue);
        findings.push(DriftFinding {
            index,
            id: record.id.clone(),
            rank: record.rank.clone(),
            ability: record.ability.clone(),
            boost: record.boost,
            issue,
        });
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp(value: i32) -> BoostField {
        BoostField {
            atk: None,
            hp: Some(value),
            special: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            CardRecord::new("zoro", "SS").with_type("Attack"),
            CardRecord::new("kaya", "C").with_type("Support"),
            CardRecord::new("nami", "C")
                .with_type("Support")
                .with_ability("")
                .with_boost(hp(6)),
            CardRecord::new("vivi", "C")
                .with_type("Support")
                .with_ability("Boosts team HP by 6%")
                .with_boost(hp(6)),
            CardRecord::new("robin", "C")
                .with_type("Support")
                .with_ability("Boosts team HP by 6%")
                .with_boost(hp(2)),
            CardRecord::new("chopper", "C").with_type("support"),
        ])
    }

    #[test]
    fn test_find_missing() {
        let missing = find_missing(&catalog());
        let ids: Vec<&str> = missing.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["kaya", "nami"]);
        assert_eq!(missing[0].index, 1);
        assert_eq!(missing[1].boost, Some(hp(6)));
    }

    #[test]
    fn test_find_drift_reports_mismatch() {
        let catalog = catalog();
        let lineage = LineageIndex::build(&catalog);
        let drift = find_drift(&catalog, &lineage);

        let ids: Vec<&str> = drift.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["kaya", "nami", "robin"]);
        assert_eq!(
            drift[0].issue,
            DriftIssue::MissingFields { ability: true, boost: true }
        );
        assert_eq!(
            drift[2].issue,
            DriftIssue::Mismatch {
                expected_ability: "Boosts team HP by 6%".to_string(),
                expected_boost: StatBoost::new(0, 6, 0),
            }
        );
    }

    #[test]
    fn test_missing_serializes_like_listing() {
        let missing = find_missing(&catalog());
        let json = serde_json::to_value(&missing[0]).unwrap();
        assert_eq!(json["id"], "kaya");
        assert_eq!(json["rank"], "C");
        assert!(json["ability"].is_null());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(find_missing(&catalog).is_empty());
        assert!(find_drift(&catalog, &LineageIndex::default()).is_empty());
    }
}
