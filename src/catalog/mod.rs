//! Card catalog: record model, literal reader and lineage index
//!
//! The catalog file is scanned for records with the balanced-brace scanner,
//! each record span is parsed as a literal and decoded into a [`CardRecord`].
//! Spans that cannot be read are reported and skipped; the rest still load.

pub mod lineage;
pub mod literal;
pub mod record;
pub mod scanner;
pub mod store;

pub use lineage::{resolve_stage, LineageIndex, StageInfo, StagePosition};
pub use record::{BoostField, CardRecord, SUPPORT_TYPE};
pub use scanner::{find_closing_brace, record_spans, RecordSpan, Span};

use crate::core::error::Result;
use ahash::AHashMap;
use serde::Serialize;
use std::path::Path;

/// A record together with the text span it was read from
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub span: Span,
    pub record: CardRecord,
}

/// A span that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Byte offset of the record's opening brace
    pub offset: usize,
    pub reason: String,
}

/// Decode a single record span
pub fn decode_record(span_text: &str) -> Result<CardRecord> {
    let parsed = literal::parse_literal(span_text)?;
    Ok(serde_json::from_value(parsed)?)
}

/// Read every record of a catalog text, in file order
pub fn read_records(text: &str) -> (Vec<ParsedRecord>, Vec<SkippedRecord>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for span in record_spans(text) {
        match span {
            RecordSpan::Complete(span) => match decode_record(&text[span.clone()]) {
                Ok(record) => records.push(ParsedRecord { span, record }),
                Err(err) => {
                    let err = err.offset_by(span.start);
                    tracing::warn!("Skipping record at byte {}: {}", span.start, err);
                    skipped.push(SkippedRecord {
                        offset: span.start,
                        reason: err.to_string(),
                    });
                }
            },
            RecordSpan::Unterminated { start } => {
                tracing::warn!("Record at byte {} has no closing brace", start);
                skipped.push(SkippedRecord {
                    offset: start,
                    reason: "no matching closing brace".to_string(),
                });
            }
        }
    }

    (records, skipped)
}

/// Loaded catalog, read-only once built
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CardRecord>,
    by_id: AHashMap<String, usize>,
}

/// Result of reading a catalog text
#[derive(Debug, Clone, Default)]
pub struct CatalogScan {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRecord>,
}

impl Catalog {
    /// Build a catalog; on duplicate ids the first record wins
    pub fn from_records(records: Vec<CardRecord>) -> Self {
        let mut by_id = AHashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.contains_key(&record.id) {
                tracing::warn!("Duplicate card id {:?} at index {}", record.id, index);
                continue;
            }
            by_id.insert(record.id.clone(), index);
        }
        Self { records, by_id }
    }

    /// Read a catalog from its text form
    pub fn parse(text: &str) -> CatalogScan {
        let (records, skipped) = read_records(text);
        let catalog = Self::from_records(records.into_iter().map(|p| p.record).collect());
        tracing::debug!(
            "Read {} catalog records ({} skipped)",
            catalog.len(),
            skipped.len()
        );
        CatalogScan { catalog, skipped }
    }

    /// Read a catalog file from disk
    pub fn load(path: &Path) -> Result<CatalogScan> {
        let text = store::read_catalog_text(path)?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, id: &str) -> Option<&CardRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    /// Records in file order
    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
