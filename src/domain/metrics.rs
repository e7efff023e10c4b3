//! Metric records and the time series they accumulate into.
//!
//! A [`Record`] is one normalized snapshot of a source, a [`Batch`] holds the
//! records produced by a single run (one per category), and [`History`] is the
//! persisted, append-only series of records per category.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field stamped on every collected record with the run timestamp.
pub const UPDATED_DATE_FIELD: &str = "updated_date";

/// One normalized snapshot of a metric source.
pub type Record = Map<String, Value>;

/// Result of invoking a single collector.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOutcome {
    Collected(Record),
    Failed { reason: String },
}

impl CollectionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Record persisted for this outcome. A failure degrades to an empty record.
    pub fn into_record(self) -> Record {
        match self {
            Self::Collected(record) => record,
            Self::Failed { .. } => Record::new(),
        }
    }
}

/// Records produced by one run, keyed by category.
///
/// Serializes as the plain `category -> record` mapping; the list of failed
/// categories is kept in memory for reporting only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Batch {
    records: BTreeMap<String, Record>,
    #[serde(skip)]
    failed: Vec<String>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the outcome for `category`, replacing any earlier entry.
    pub fn insert(&mut self, category: impl Into<String>, outcome: CollectionOutcome) {
        let category = category.into();
        self.failed.retain(|c| c != &category);
        if outcome.is_failure() {
            self.failed.push(category.clone());
        }
        self.records.insert(category, outcome.into_record());
    }

    pub fn get(&self, category: &str) -> Option<&Record> {
        self.records.get(category)
    }

    pub fn records(&self) -> &BTreeMap<String, Record> {
        &self.records
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Categories whose collector failed during this run, in insertion order.
    pub fn failed_categories(&self) -> &[String] {
        &self.failed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> BTreeMap<String, Record> {
        self.records
    }
}

/// Persisted time series: category -> records in run order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    series: BTreeMap<String, Vec<Record>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far for `category`. Unknown categories are empty.
    pub fn series(&self, category: &str) -> &[Record] {
        self.series.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.series.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Appends every record of `batch` to the end of its category's series.
    ///
    /// Categories missing from the batch are left untouched; no gap marker is
    /// written for them.
    pub fn merge(&mut self, batch: Batch) -> &mut Self {
        for (category, record) in batch.into_records() {
            self.series.entry(category).or_default().push(record);
        }
        self
    }
}

impl From<BTreeMap<String, Vec<Record>>> for History {
    fn from(series: BTreeMap<String, Vec<Record>>) -> Self {
        Self { series }
    }
}
