use serde_json::{Map, Value};

/// Envelope field holding the record array.
pub const ENVELOPE_FIELD: &str = "value";

/// Per-record metadata key that never becomes a column.
pub const METADATA_KEY: &str = "@odata.etag";

/// One entry of the record array as decoded. Object keys keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub data: Value,
}

impl Record {
    /// `None` when the entry is not a JSON object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.data.as_object()
    }
}

/// Records ready to be written, with the column list fixed from the first one.
#[derive(Debug, Clone)]
pub struct OrderTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone)]
pub enum TransformResult {
    Table(OrderTable),
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved { path: String, rows: usize },
    NoData,
}
