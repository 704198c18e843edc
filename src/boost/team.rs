//! Team boost aggregation
//!
//! Sums per-card contributions over a roster. Unknown ids are skipped
//! silently so partially stale rosters still evaluate.

use crate::boost::classify::{classify, BoostReason, Classification};
use crate::boost::magnitude::magnitude;
use crate::catalog::{CardRecord, Catalog, LineageIndex};
use crate::core::types::StatBoost;
use serde::Serialize;

/// What one card adds to its team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contribution {
    pub boost: StatBoost,
    /// `None` when the card grants nothing
    pub reason: Option<BoostReason>,
}

/// Per-card line of a detailed team evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionEntry {
    pub id: String,
    pub name: Option<String>,
    pub atk: i32,
    pub hp: i32,
    pub special: i32,
    pub reason: Option<BoostReason>,
}

/// Totals plus the per-card breakdown, in roster order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamReport {
    pub totals: StatBoost,
    pub details: Vec<ContributionEntry>,
}

/// Evaluates rosters against a loaded catalog
///
/// Holds only shared references, so one evaluator can serve many callers
/// while the catalog is not being rewritten.
#[derive(Debug, Clone, Copy)]
pub struct TeamEvaluator<'a> {
    catalog: &'a Catalog,
    lineage: &'a LineageIndex,
}

impl<'a> TeamEvaluator<'a> {
    pub fn new(catalog: &'a Catalog, lineage: &'a LineageIndex) -> Self {
        Self { catalog, lineage }
    }

    /// Contribution of a single card
    pub fn contribution(&self, record: &CardRecord) -> Contribution {
        match classify(record) {
            Classification::Explicit(boost) => Contribution {
                boost,
                reason: Some(BoostReason::ExplicitBoost),
            },
            Classification::PercentText { mode, value } => Contribution {
                boost: mode.apply(i32::try_from(value).unwrap_or(i32::MAX)),
                reason: Some(BoostReason::AbilityText),
            },
            Classification::Inferred { mode, reason } => {
                let position = self.lineage.position(&record.id);
                let value = record.rank_tier().and_then(|rank| {
                    magnitude(rank, mode.range_mode(), position.stage, position.max_stage)
                });
                match value {
                    Some(value) => Contribution {
                        boost: mode.apply(i32::try_from(value).unwrap_or(i32::MAX)),
                        reason: Some(reason),
                    },
                    None => Contribution::default(),
                }
            }
            Classification::NoBoost => Contribution::default(),
        }
    }

    /// Summed boosts for a roster
    pub fn team_boosts<S: AsRef<str>>(&self, roster: &[S]) -> StatBoost {
        roster
            .iter()
            .filter_map(|id| self.catalog.get(id.as_ref()))
            .fold(StatBoost::ZERO, |mut total, record| {
                total += self.contribution(record).boost;
                total
            })
    }

    /// Summed boosts plus one entry per resolvable card
    pub fn team_boosts_detailed<S: AsRef<str>>(&self, roster: &[S]) -> TeamReport {
        let mut report = TeamReport::default();

        for id in roster {
            let Some(record) = self.catalog.get(id.as_ref()) else {
                tracing::debug!("Roster id {:?} not in catalog", id.as_ref());
                continue;
            };

            let contribution = self.contribution(record);
            report.totals += contribution.boost;
            report.details.push(ContributionEntry {
                id: record.id.clone(),
                name: record.name.clone(),
                atk: contribution.boost.atk,
                hp: contribution.boost.hp,
                special: contribution.boost.special,
                reason: contribution.reason,
            });
        }

        report
    }
}
