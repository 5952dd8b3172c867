use serde::{Deserialize, Serialize};

/// One normalized quote snapshot.
///
/// Produced only by a successful parse or synthetic step; never partially
/// populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub current: f64,
    pub previous_close: f64,
    pub open: f64,
}

impl QuoteRecord {
    pub const fn new(current: f64, previous_close: f64, open: f64) -> Self {
        Self {
            current,
            previous_close,
            open,
        }
    }
}

/// A fetched record plus the display name the source surfaced alongside it,
/// if any. The instrument captures the name opportunistically from the first
/// successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub record: QuoteRecord,
    pub name: Option<String>,
}

impl Fetched {
    pub fn new(record: QuoteRecord, name: Option<String>) -> Self {
        Self { record, name }
    }
}
