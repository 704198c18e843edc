//! Evolution stages and lineages
//!
//! A card id may end in `_<digits>` naming its evolution stage; the part
//! before the suffix is the lineage (base id). The index records the highest
//! stage seen per lineage across the whole catalog and is built once after
//! the catalog loads.

use crate::catalog::Catalog;
use ahash::AHashMap;

/// Stage parsed from a card id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo<'a> {
    pub stage: u32,
    pub base_id: &'a str,
}

/// Where a card sits within its lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePosition {
    pub stage: u32,
    pub max_stage: u32,
}

/// Split a trailing `_<digits>` stage marker off an id
///
/// Ids without a marker are stage 1 of a lineage named by the id itself.
/// Markers too large for `u32` saturate.
pub fn resolve_stage(id: &str) -> StageInfo<'_> {
    let digits = id.bytes().rev().take_while(u8::is_ascii_digit).count();
    let split = id.len() - digits;

    if digits > 0 && split > 0 && id.as_bytes()[split - 1] == b'_' {
        let stage = id[split..].parse::<u32>().unwrap_or(u32::MAX);
        return StageInfo {
            stage,
            base_id: &id[..split - 1],
        };
    }

    StageInfo {
        stage: 1,
        base_id: id,
    }
}

/// Highest stage per lineage
#[derive(Debug, Clone, Default)]
pub struct LineageIndex {
    max_stages: AHashMap<String, u32>,
}

impl LineageIndex {
    /// Index every record of a loaded catalog
    pub fn build(catalog: &Catalog) -> Self {
        Self::from_ids(catalog.iter().map(|record| record.id.as_str()))
    }

    /// Index a set of card ids; empty ids are ignored
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut max_stages: AHashMap<String, u32> = AHashMap::new();
        for id in ids.into_iter().filter(|id| !id.is_empty()) {
            let info = resolve_stage(id);
            let current = max_stages.entry(info.base_id.to_string()).or_insert(0);
            *current = (*current).max(info.stage);
        }
        Self { max_stages }
    }

    /// Highest stage in a lineage, at least 1
    pub fn max_stage(&self, base_id: &str) -> u32 {
        self.max_stages
            .get(base_id)
            .copied()
            .filter(|&stage| stage > 0)
            .unwrap_or(1)
    }

    /// Stage and lineage ceiling for a card id
    pub fn position(&self, id: &str) -> StagePosition {
        let info = resolve_stage(id);
        StagePosition {
            stage: info.stage,
            max_stage: self.max_stage(info.base_id),
        }
    }

    /// Number of distinct lineages indexed
    pub fn len(&self) -> usize {
        self.max_stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.max_stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stage_suffixes() {
        assert_eq!(resolve_stage("nojiko_02"), StageInfo { stage: 2, base_id: "nojiko" });
        assert_eq!(resolve_stage("nojiko_3"), StageInfo { stage: 3, base_id: "nojiko" });
        assert_eq!(resolve_stage("big_mom_123"), StageInfo { stage: 123, base_id: "big_mom" });
    }

    #[test]
    fn test_resolve_stage_without_suffix() {
        assert_eq!(resolve_stage("nojiko"), StageInfo { stage: 1, base_id: "nojiko" });
        assert_eq!(resolve_stage("zoro2"), StageInfo { stage: 1, base_id: "zoro2" });
        assert_eq!(resolve_stage("ace_"), StageInfo { stage: 1, base_id: "ace_" });
        assert_eq!(resolve_stage(""), StageInfo { stage: 1, base_id: "" });
    }

    #[test]
    fn test_resolve_stage_only_last_marker() {
        assert_eq!(resolve_stage("law_2_03"), StageInfo { stage: 3, base_id: "law_2" });
    }

    #[test]
    fn test_resolve_stage_saturates() {
        assert_eq!(resolve_stage("x_99999999999").stage, u32::MAX);
    }

    #[test]
    fn test_max_stage_across_lineage() {
        let index = LineageIndex::from_ids(["nojiko", "nojiko_02", "nojiko_03", "nami_02"]);
        assert_eq!(index.max_stage("nojiko"), 3);
        assert_eq!(index.max_stage("nami"), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_max_stage_defaults_to_one() {
        let index = LineageIndex::from_ids(["solo", "zero_0"]);
        assert_eq!(index.max_stage("solo"), 1);
        assert_eq!(index.max_stage("unknown"), 1);
        // Stage 0 never raises the ceiling
        assert_eq!(index.max_stage("zero"), 1);
    }

    #[test]
    fn test_position() {
        let index = LineageIndex::from_ids(["robin_01", "robin_02", "robin_04"]);
        assert_eq!(index.position("robin_02"), StagePosition { stage: 2, max_stage: 4 });
        assert_eq!(index.position("robin"), StagePosition { stage: 1, max_stage: 4 });
    }
}
