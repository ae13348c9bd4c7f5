//! # Record Source Module
//!
//! Validated parsing of external documents into employee records.
//!
//! - Reject malformed input with `RosterError::DataFormat`
//! - Name the failing record and field in every error
//! - Read salaries from their decimal text, never through floats
//! - All-or-nothing: one bad record fails the whole source

use crate::amount::Amount;
use crate::primitives::{MAX_RECORDS, SOURCE_DATE_FORMAT};
use crate::{Employee, RosterError};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

// =============================================================================
// RECORD SOURCE TRAIT
// =============================================================================

/// The seam between external documents and the registry.
///
/// Implementors turn some external representation into validated
/// `Employee` records. A source either yields every record or fails;
/// partial results are never returned.
pub trait RecordSource {
    fn read_records(&self) -> Result<Vec<Employee>, RosterError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn read_records(&self) -> Result<Vec<Employee>, RosterError> {
        (**self).read_records()
    }
}

// =============================================================================
// JSON SOURCE
// =============================================================================

/// Field names accepted for each record attribute, in lookup order.
///
/// The Portuguese keys are the ones used by the bundled data file.
const NAME_KEYS: &[&str] = &["name", "nome"];
const SALARY_KEYS: &[&str] = &["salary", "salario"];
const BIRTH_DATE_KEYS: &[&str] = &["birthDate", "dataNascimento"];
const ROLE_KEYS: &[&str] = &["role", "funcao"];

/// A JSON array-of-objects document held in memory.
///
/// ```json
/// [{ "name": "João", "salary": 2000.00, "birthDate": "1980-05-12", "role": "Analista" }]
/// ```
#[derive(Debug, Clone)]
pub struct JsonSource {
    bytes: Vec<u8>,
}

impl JsonSource {
    /// Wrap an in-memory JSON document.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read a whole JSON document from a stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RosterError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| RosterError::IoError(format!("Read record source: {}", e)))?;
        Ok(Self { bytes })
    }

    /// Read a JSON document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| RosterError::IoError(format!("Open '{}': {}", path.display(), e)))?;
        Self::from_reader(file)
    }
}

impl RecordSource for JsonSource {
    fn read_records(&self) -> Result<Vec<Employee>, RosterError> {
        let document: Value = serde_json::from_slice(&self.bytes)
            .map_err(|e| RosterError::DataFormat(format!("invalid JSON: {}", e)))?;

        let items = document.as_array().ok_or_else(|| {
            RosterError::DataFormat("record source must be a JSON array".to_string())
        })?;

        if items.len() > MAX_RECORDS {
            return Err(RosterError::DataFormat(format!(
                "record count {} exceeds maximum {}",
                items.len(),
                MAX_RECORDS
            )));
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_record(item).map_err(|e| at_record(index, e)))
            .collect()
    }
}

fn at_record(index: usize, error: RosterError) -> RosterError {
    match error {
        RosterError::DataFormat(msg) => RosterError::DataFormat(format!("record {index}: {msg}")),
        other => other,
    }
}

/// Convert one JSON object into a validated employee.
fn parse_record(item: &Value) -> Result<Employee, RosterError> {
    let object = item
        .as_object()
        .ok_or_else(|| RosterError::DataFormat("expected a JSON object".to_string()))?;

    let name = text_field(object, NAME_KEYS)?;
    let role = text_field(object, ROLE_KEYS)?;

    let raw_date = text_field(object, BIRTH_DATE_KEYS)?;
    let birth_date = NaiveDate::parse_from_str(raw_date.trim(), SOURCE_DATE_FORMAT).map_err(|e| {
        RosterError::DataFormat(format!(
            "field `{}`: invalid date '{}': {}",
            BIRTH_DATE_KEYS[0], raw_date, e
        ))
    })?;

    let salary_text = match field(object, SALARY_KEYS)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(RosterError::DataFormat(format!(
                "field `{}`: expected a number, found {}",
                SALARY_KEYS[0],
                kind(other)
            )));
        }
    };
    let salary = Amount::parse(&salary_text).map_err(|e| {
        RosterError::DataFormat(format!("field `{}`: {}", SALARY_KEYS[0], e))
    })?;

    Employee::new(name, birth_date, salary, role)
}

/// Look up the first present key. `null` counts as missing.
fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Result<&'a Value, RosterError> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
        .ok_or_else(|| RosterError::DataFormat(format!("missing field `{}`", keys[0])))
}

fn text_field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Result<&'a str, RosterError> {
    let value = field(object, keys)?;
    value.as_str().ok_or_else(|| {
        RosterError::DataFormat(format!(
            "field `{}`: expected a string, found {}",
            keys[0],
            kind(value)
        ))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn read(json: &str) -> Result<Vec<Employee>, RosterError> {
        JsonSource::from_bytes(json).read_records()
    }

    fn data_format_message(result: Result<Vec<Employee>, RosterError>) -> String {
        match result {
            Err(RosterError::DataFormat(msg)) => msg,
            other => format!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn reads_english_keys() {
        let records = read(
            r#"[{"name":"João","salary":2000.00,"birthDate":"1980-05-12","role":"Analista"}]"#,
        )
        .expect("read");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "João");
        assert_eq!(records[0].salary().to_string(), "2000.00");
        assert_eq!(records[0].role(), "Analista");
    }

    #[test]
    fn reads_portuguese_keys() {
        let records = read(
            r#"[{"nome":"Maria","salario":"3000.00","dataNascimento":"1975-09-23","funcao":"Gerente"}]"#,
        )
        .expect("read");

        assert_eq!(records[0].name(), "Maria");
        assert_eq!(
            records[0].birth_date(),
            NaiveDate::from_ymd_opt(1975, 9, 23).expect("date")
        );
    }

    #[test]
    fn salary_keeps_exact_decimal_text() {
        let records = read(
            r#"[{"name":"A","salary":2284.38,"birthDate":"1990-05-12","role":"Operador"}]"#,
        )
        .expect("read");
        assert_eq!(records[0].salary().hundredths(), 228_438);
    }

    #[test]
    fn salary_is_rounded_half_up_on_load() {
        let records = read(
            r#"[{"name":"A","salary":"1000.005","birthDate":"1990-05-12","role":"Operador"}]"#,
        )
        .expect("read");
        assert_eq!(records[0].salary().to_string(), "1000.01");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(read("[]").expect("read").is_empty());
    }

    #[test]
    fn rejects_non_array_document() {
        let msg = data_format_message(read(r#"{"name":"João"}"#));
        assert!(msg.contains("JSON array"), "{msg}");
    }

    #[test]
    fn rejects_invalid_json() {
        let msg = data_format_message(read("[{"));
        assert!(msg.contains("invalid JSON"), "{msg}");
    }

    #[test]
    fn rejects_missing_field_with_record_index() {
        let msg = data_format_message(read(
            r#"[
                {"name":"A","salary":1,"birthDate":"1990-05-12","role":"X"},
                {"name":"B","birthDate":"1990-05-12","role":"X"}
            ]"#,
        ));
        assert_eq!(msg, "record 1: missing field `salary`");
    }

    #[test]
    fn rejects_null_field() {
        let msg = data_format_message(read(
            r#"[{"name":null,"salary":1,"birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert_eq!(msg, "record 0: missing field `name`");
    }

    #[test]
    fn rejects_unparsable_date() {
        let msg = data_format_message(read(
            r#"[{"name":"A","salary":1,"birthDate":"12/05/1990","role":"X"}]"#,
        ));
        assert!(msg.starts_with("record 0: field `birthDate`: invalid date"), "{msg}");
    }

    #[test]
    fn rejects_wrong_types() {
        let msg = data_format_message(read(
            r#"[{"name":42,"salary":1,"birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert_eq!(msg, "record 0: field `name`: expected a string, found a number");

        let msg = data_format_message(read(
            r#"[{"name":"A","salary":true,"birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert_eq!(msg, "record 0: field `salary`: expected a number, found a boolean");
    }

    #[test]
    fn rejects_negative_and_unparsable_salary() {
        let msg = data_format_message(read(
            r#"[{"name":"A","salary":-10.5,"birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert!(msg.contains("negative amount"), "{msg}");

        let msg = data_format_message(read(
            r#"[{"name":"A","salary":"R$ 10","birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert!(msg.contains("invalid decimal"), "{msg}");
    }

    #[test]
    fn rejects_blank_name() {
        let msg = data_format_message(read(
            r#"[{"name":"  ","salary":1,"birthDate":"1990-05-12","role":"X"}]"#,
        ));
        assert_eq!(msg, "record 0: field `name` is empty");
    }

    #[test]
    fn from_reader_reads_stream() {
        let json = r#"[{"name":"A","salary":1,"birthDate":"1990-05-12","role":"X"}]"#;
        let source = JsonSource::from_reader(json.as_bytes()).expect("reader");
        assert_eq!(source.read_records().expect("read").len(), 1);
    }
}
