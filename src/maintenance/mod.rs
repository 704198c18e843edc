//! Catalog maintenance: canonical boosts, the patcher and the drift validator

pub mod canonical;
pub mod drift;
pub mod patcher;

pub use canonical::{canonical_boost, describe, render_boost, CanonicalBoost, CanonicalSource, PATCH_RULES};
pub use drift::{find_drift, find_missing, DriftFinding, DriftIssue, MissingBoost};
pub use patcher::{apply_support_boosts, patch_catalog_text, PatchOutcome, PatchReport, PatchedRecord};
