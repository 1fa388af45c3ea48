use crate::domain::model::{OrderTable, Record, TransformResult, ENVELOPE_FIELD, METADATA_KEY};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::io::Write;

/// Decodes an envelope into an [`OrderTable`].
///
/// Malformed JSON and a non-object root are errors. A missing, non-array or
/// empty record field is [`TransformResult::NoData`].
pub fn parse_envelope(raw: &str) -> Result<TransformResult> {
    let document: Value = serde_json::from_str(raw)?;

    let mut envelope = match document {
        Value::Object(envelope) => envelope,
        other => {
            return Err(EtlError::UnexpectedError {
                message: format!(
                    "expected a JSON object envelope, found {}",
                    json_kind(&other)
                ),
            })
        }
    };

    let items = match envelope.remove(ENVELOPE_FIELD) {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Ok(TransformResult::NoData),
    };

    let columns = derive_columns(&items[0]);
    let records = items.into_iter().map(|data| Record { data }).collect();

    Ok(TransformResult::Table(OrderTable { columns, records }))
}

/// Column list taken from the first record, in source order, without the metadata key.
pub fn derive_columns(first: &Value) -> Vec<String> {
    match first {
        Value::Object(fields) => fields
            .keys()
            .filter(|name| name.as_str() != METADATA_KEY)
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Text of one cell. Only values containing a comma are quoted; embedded quotes
/// and newlines pass through untouched.
pub fn render_cell(value: Option<&Value>) -> Result<String> {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => serde_json::to_string(nested)
            .map_err(|e| EtlError::WriteError {
                message: e.to_string(),
            })?,
        Some(scalar) => scalar.to_string(),
    };

    if text.contains(',') {
        Ok(format!("\"{}\"", text))
    } else {
        Ok(text)
    }
}

/// Fails when a column has to be looked up in a record that is not an object.
pub fn format_row(record: &Record, columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        return Ok(String::new());
    }

    let fields = record.fields().ok_or_else(|| EtlError::WriteError {
        message: format!(
            "record is {}, not an object: {}",
            json_kind(&record.data),
            record.data
        ),
    })?;

    let cells = columns
        .iter()
        .map(|column| render_cell(fields.get(column)))
        .collect::<Result<Vec<_>>>()?;
    Ok(cells.join(","))
}

pub struct CsvWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Writes header and rows to `path`, returning the number of data rows.
    ///
    /// A failure midway leaves the rows written so far in place.
    pub fn write_table(&self, table: &OrderTable, path: &str) -> Result<usize> {
        let mut writer = self.storage.create(path)?;

        writeln!(writer, "{}", table.columns.join(","))?;
        for record in &table.records {
            let line = match format_row(record, &table.columns) {
                Ok(line) => line,
                Err(e) => {
                    writer.flush()?;
                    return Err(e);
                }
            };
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Wrote {} rows x {} columns to {}",
            table.records.len(),
            table.columns.len(),
            path
        );
        Ok(table.records.len())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MemoryStorage {
        fn contents(&self, path: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .map(|bytes| String::from_utf8(bytes.clone()).unwrap())
        }
    }

    struct MemoryFile {
        path: String,
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Write for MemoryFile {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let mut files = self.files.lock().unwrap();
            files.entry(self.path.clone()).or_default().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Storage for MemoryStorage {
        type Writer = MemoryFile;

        fn create(&self, path: &str) -> Result<MemoryFile> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), Vec::new());
            Ok(MemoryFile {
                path: path.to_string(),
                files: self.files.clone(),
            })
        }
    }

    fn table_from(raw: &str) -> OrderTable {
        match parse_envelope(raw).unwrap() {
            TransformResult::Table(table) => table,
            TransformResult::NoData => panic!("expected records in {raw}"),
        }
    }

    #[test]
    fn test_columns_follow_first_record_without_etag() {
        let table = table_from(
            r#"{"value":[{"@odata.etag":"x","OrderID":1,"CustomerID":"VINET","Freight":32.38}]}"#,
        );
        assert_eq!(table.columns, vec!["OrderID", "CustomerID", "Freight"]);
    }

    #[test]
    fn test_no_data_when_array_missing_empty_or_wrong_type() {
        for raw in [
            r#"{}"#,
            r#"{"value":[]}"#,
            r#"{"value":null}"#,
            r#"{"value":{"OrderID":1}}"#,
            r#"{"@odata.context":"x","items":[{"a":1}]}"#,
        ] {
            assert!(
                matches!(parse_envelope(raw).unwrap(), TransformResult::NoData),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = parse_envelope(r#"{"value":[{"OrderID":1}"#).unwrap_err();
        assert!(matches!(err, EtlError::InvalidJson(_)));
    }

    #[test]
    fn test_non_object_root_is_unexpected() {
        let err = parse_envelope(r#"[{"OrderID":1}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected error: expected a JSON object envelope, found an array"
        );
    }

    #[test]
    fn test_render_cell_quoting_and_nulls() {
        assert_eq!(render_cell(None).unwrap(), "");
        assert_eq!(render_cell(Some(&Value::Null)).unwrap(), "");
        assert_eq!(render_cell(Some(&json!("Reims"))).unwrap(), "Reims");
        assert_eq!(render_cell(Some(&json!("ALFKI, Inc"))).unwrap(), "\"ALFKI, Inc\"");
        assert_eq!(render_cell(Some(&json!(10248))).unwrap(), "10248");
        assert_eq!(render_cell(Some(&json!(32.38))).unwrap(), "32.38");
        assert_eq!(render_cell(Some(&json!(true))).unwrap(), "true");
        // Embedded quotes are not escaped.
        assert_eq!(render_cell(Some(&json!("say \"hi\""))).unwrap(), "say \"hi\"");
        assert_eq!(render_cell(Some(&json!("a,\"b\""))).unwrap(), "\"a,\"b\"\"");
    }

    #[test]
    fn test_render_cell_nested_values_as_json_text() {
        assert_eq!(render_cell(Some(&json!({"City": "Lyon"}))).unwrap(), r#"{"City":"Lyon"}"#);
        assert_eq!(render_cell(Some(&json!([1, 2]))).unwrap(), "\"[1,2]\"");
    }

    #[test]
    fn test_write_table_matches_expected_csv() {
        let storage = MemoryStorage::default();
        let writer = CsvWriter::new(storage.clone());
        let table = table_from(
            r#"{"value":[{"OrderID":1,"CustomerID":"ALFKI, Inc","@odata.etag":"x"}]}"#,
        );

        let rows = writer.write_table(&table, "orders.csv").unwrap();

        assert_eq!(rows, 1);
        assert_eq!(
            storage.contents("orders.csv").unwrap(),
            "OrderID,CustomerID\n1,\"ALFKI, Inc\"\n"
        );
    }

    #[test]
    fn test_later_records_follow_first_record_schema() {
        let storage = MemoryStorage::default();
        let writer = CsvWriter::new(storage.clone());
        let table = table_from(
            r#"{"value":[
                {"OrderID":1,"ShipCity":"Reims"},
                {"ShipCity":"Lyon","OrderID":2,"Extra":"dropped"},
                {"OrderID":3},
                {"OrderID":4,"ShipCity":null}
            ]}"#,
        );

        writer.write_table(&table, "out.csv").unwrap();

        assert_eq!(
            storage.contents("out.csv").unwrap(),
            "OrderID,ShipCity\n1,Reims\n2,Lyon\n3,\n4,\n"
        );
    }

    #[test]
    fn test_non_object_record_stops_write_and_keeps_earlier_rows() {
        let storage = MemoryStorage::default();
        let writer = CsvWriter::new(storage.clone());
        let table = table_from(r#"{"value":[{"OrderID":1,"Ok":true},42,"x,y"]}"#);

        let err = writer.write_table(&table, "orders.csv").unwrap_err();

        assert!(matches!(err, EtlError::WriteError { .. }));
        assert_eq!(
            err.to_string(),
            "Unexpected error while writing CSV: record is a number, not an object: 42"
        );
        assert_eq!(
            storage.contents("orders.csv").unwrap(),
            "OrderID,Ok\n1,true\n"
        );
    }

    #[test]
    fn test_non_object_first_record_has_no_columns() {
        let table = table_from(r#"{"value":["x",{"OrderID":1}]}"#);
        assert!(table.columns.is_empty());
        assert_eq!(format_row(&table.records[0], &table.columns).unwrap(), "");
        assert_eq!(format_row(&table.records[1], &table.columns).unwrap(), "");
    }

    #[test]
    fn test_write_table_truncates_previous_contents() {
        let storage = MemoryStorage::default();
        storage
            .files
            .lock()
            .unwrap()
            .insert("orders.csv".to_string(), b"stale\nstale\nstale\n".to_vec());
        let writer = CsvWriter::new(storage.clone());

        writer
            .write_table(&table_from(r#"{"value":[{"a":1}]}"#), "orders.csv")
            .unwrap();

        assert_eq!(storage.contents("orders.csv").unwrap(), "a\n1\n");
    }
}
