//! Catalog patcher
//!
//! Rewrites every Support record so it carries an ability string and an
//! explicit `boost` field consistent with [`canonical_boost`]. Edits touch
//! only the ability and boost values (or insert those fields next to their
//! neighbours); every other byte of the catalog is copied through unchanged.
//! Running the patcher on its own output changes nothing.

use crate::catalog::literal::{object_fields, FieldSpan};
use crate::catalog::{read_records, store, BoostField, LineageIndex, SkippedRecord, Span};
use crate::core::config::EngineConfig;
use crate::core::error::{BoostError, Result};
use crate::core::types::StatBoost;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Reverse;
use std::path::Path;

use super::canonical::{canonical_boost, render_boost, CanonicalBoost};

/// A record the patcher rewrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchedRecord {
    pub id: String,
    /// Byte offset of the record in the original text
    pub offset: usize,
    pub ability: String,
    pub boost: StatBoost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub patched: Vec<PatchedRecord>,
    /// Support records already in canonical form
    pub unchanged: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl PatchReport {
    pub fn is_noop(&self) -> bool {
        self.patched.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub text: String,
    pub report: PatchReport,
}

/// One replacement inside a record; insertions have an empty span
struct Edit {
    span: Span,
    text: String,
}

fn key_text(name: &str, quoted: bool) -> String {
    if quoted {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

fn boost_matches(value: &Value, expected: StatBoost) -> bool {
    serde_json::from_value::<BoostField>(value.clone())
        .map(|field| field.to_stat_boost() == expected)
        .unwrap_or(false)
}

/// Separator placed before each inserted field
///
/// Multi-line records get a newline plus the anchor field's indent; records
/// written on a single line get a plain space.
fn field_separator(record: &str, anchor: &FieldSpan, config: &EngineConfig) -> String {
    let before = &record[..anchor.key_start];
    if let Some(newline) = before.rfind('\n') {
        let indent = &before[newline + 1..];
        if indent.chars().all(char::is_whitespace) {
            return format!("\n{}", indent);
        }
    }
    if record.contains('\n') {
        format!("\n{}", config.field_indent)
    } else {
        " ".to_string()
    }
}

/// New text for one record, or `None` when it is already canonical
fn rewrite_record(
    record: &str,
    canonical: &CanonicalBoost,
    config: &EngineConfig,
) -> Result<Option<String>> {
    let fields = object_fields(record)?;
    let find = |name: &str| fields.iter().find(|f| f.key == name);
    let quoted = fields.first().is_some_and(|f| f.quoted_key);

    let ability = find("ability");
    let boost = find("boost");
    let ability_literal = serde_json::to_string(&canonical.ability)?;
    let boost_literal = render_boost(canonical.mode, canonical.value, quoted);

    let mut edits = Vec::new();
    let mut inserted = Vec::new();

    match ability {
        Some(field) if field.value.as_str() == Some(canonical.ability.as_str()) => {}
        Some(field) => edits.push(Edit {
            span: field.value_span.clone(),
            text: ability_literal,
        }),
        None => inserted.push(format!("{}: {}", key_text("ability", quoted), ability_literal)),
    }

    match boost {
        Some(field) if boost_matches(&field.value, canonical.boost()) => {}
        Some(field) => edits.push(Edit {
            span: field.value_span.clone(),
            text: boost_literal,
        }),
        None => inserted.push(format!("{}: {}", key_text("boost", quoted), boost_literal)),
    }

    if !inserted.is_empty() {
        let anchor = ability
            .or_else(|| find("image"))
            .or_else(|| fields.last())
            .ok_or_else(|| BoostError::SyntaxError {
                offset: 0,
                message: "record has no fields".to_string(),
            })?;
        let separator = field_separator(record, anchor, config);

        let edit = match anchor.comma {
            Some(comma) => Edit {
                span: comma + 1..comma + 1,
                text: inserted
                    .iter()
                    .map(|line| format!("{}{},", separator, line))
                    .collect(),
            },
            None => Edit {
                span: anchor.value_span.end..anchor.value_span.end,
                text: inserted
                    .iter()
                    .map(|line| format!(",{}{}", separator, line))
                    .collect(),
            },
        };
        edits.push(edit);
    }

    if edits.is_empty() {
        return Ok(None);
    }

    edits.sort_by_key(|edit| Reverse(edit.span.start));
    let mut rewritten = record.to_string();
    for edit in edits {
        rewritten.replace_range(edit.span, &edit.text);
    }
    Ok(Some(rewritten))
}

/// Patch catalog text in memory
pub fn patch_catalog_text(text: &str, config: &EngineConfig) -> PatchOutcome {
    let (records, mut skipped) = read_records(text);
    let lineage = LineageIndex::from_ids(records.iter().map(|p| p.record.id.as_str()));

    let mut report = PatchReport::default();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for parsed in records.iter().filter(|p| p.record.is_listed_support()) {
        let record = &parsed.record;
        let span = parsed.span.clone();

        if record.id.is_empty() || record.rank.is_none() {
            tracing::debug!("Support record at byte {} lacks id or rank", span.start);
            skipped.push(SkippedRecord {
                offset: span.start,
                reason: "missing id or rank".to_string(),
            });
            continue;
        }

        let canonical = canonical_boost(record, &lineage);
        match rewrite_record(&text[span.clone()], &canonical, config) {
            Ok(None) => {
                tracing::debug!("{} already canonical", record.id);
                report.unchanged += 1;
            }
            Ok(Some(rewritten)) => {
                out.push_str(&text[cursor..span.start]);
                out.push_str(&rewritten);
                cursor = span.end;
                report.patched.push(PatchedRecord {
                    id: record.id.clone(),
                    offset: span.start,
                    ability: canonical.ability.clone(),
                    boost: canonical.boost(),
                });
            }
            Err(err) => {
                let err = err.offset_by(span.start);
                tracing::warn!("Leaving {} untouched: {}", record.id, err);
                skipped.push(SkippedRecord {
                    offset: span.start,
                    reason: err.to_string(),
                });
            }
        }
    }
    out.push_str(&text[cursor..]);

    skipped.sort_by_key(|s| s.offset);
    report.skipped = skipped;
    PatchOutcome { text: out, report }
}

/// Patch the catalog file at `path` in place
///
/// The file is read once and, if anything changed, replaced atomically.
pub fn apply_support_boosts(path: &Path, config: &EngineConfig) -> Result<PatchReport> {
    let text = store::read_catalog_text(path)?;
    let outcome = patch_catalog_text(&text, config);

    if outcome.text != text {
        store::write_atomic(path, &outcome.text)?;
    }

    tracing::info!(
        "Patched {} support records in {} ({} unchanged, {} skipped)",
        outcome.report.patched.len(),
        path.display(),
        outcome.report.unchanged,
        outcome.report.skipped.len()
    );
    Ok(outcome.report)
}
