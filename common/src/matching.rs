//! Tolerant matching between field names and spreadsheet columns.
//!
//! Backend column headers and designer field names drift in case and
//! separators (`Full Name` vs `full_name`); both sides are compared through
//! [`normalize_key`].

use std::collections::HashSet;

use serde_json::Value;

use crate::error::PreflightError;
use crate::fields::FieldSet;
use crate::model::cell_text;
use crate::model::data::{SampleRow, UploadedDataFile};

/// Lower-cases and removes underscores and whitespace.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Finds the sample value for a field: exact key first, then normalized key.
pub fn resolve_sample_value<'a>(field_name: &str, row: &'a SampleRow) -> Option<&'a Value> {
    if let Some(value) = row.get(field_name) {
        return Some(value);
    }
    let wanted = normalize_key(field_name);
    row.iter()
        .find(|(key, _)| normalize_key(key) == wanted)
        .map(|(_, value)| value)
}

pub fn is_photo_field(field_name: &str) -> bool {
    field_name.eq_ignore_ascii_case("photo")
}

/// What the preview draws inside a field box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    Photo,
    Text(String),
}

/// Resolves the preview content for a field, falling back to the field's own
/// name when the sample row has no (or an empty) value.
pub fn preview_content(field_name: &str, row: Option<&SampleRow>) -> PreviewContent {
    if is_photo_field(field_name) {
        return PreviewContent::Photo;
    }
    let text = row
        .and_then(|row| resolve_sample_value(field_name, row))
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| field_name.to_string());
    PreviewContent::Text(text)
}

/// Every mapped field name without a normalized match among `columns`, in
/// mapping order.
pub fn unmatched_fields<'a>(
    names: impl IntoIterator<Item = &'a str>,
    columns: &[String],
) -> Vec<String> {
    let known: HashSet<String> = columns.iter().map(|c| normalize_key(c)).collect();
    names
        .into_iter()
        .filter(|name| !known.contains(&normalize_key(name)))
        .map(str::to_string)
        .collect()
}

/// Checks that a generation request can be sent and returns the data file it
/// would send.
pub fn preflight<'a>(
    fields: &FieldSet,
    data: Option<&'a UploadedDataFile>,
) -> Result<&'a UploadedDataFile, PreflightError> {
    let data = data.ok_or(PreflightError::MissingData)?;
    if fields.is_empty() {
        return Err(PreflightError::NoFieldMappings);
    }
    let unmatched = unmatched_fields(fields.names(), data.columns());
    if !unmatched.is_empty() {
        return Err(PreflightError::UnmatchedFields(unmatched));
    }
    Ok(data)
}

/// Sidebar label for a column: separators become spaces, first letter
/// capitalised.
pub fn pretty_label(column: &str) -> String {
    let spaced: Vec<&str> = column
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let joined = spaced.join(" ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{DataPreview, StoredFile};
    use crate::model::template::FieldMapping;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(value: Value) -> SampleRow {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn uploaded(columns: &[&str]) -> UploadedDataFile {
        UploadedDataFile {
            file: StoredFile {
                name: "people.csv".into(),
                mime_type: "text/csv".into(),
                data_url: "data:text/csv;base64,".into(),
            },
            preview: DataPreview {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                sample_data: vec![],
                total_rows: 0,
            },
        }
    }

    fn fields(names: &[&str]) -> FieldSet {
        FieldSet::from_mappings(names.iter().map(|n| FieldMapping::new_at(*n, 0.0, 0.0)))
    }

    #[test]
    fn normalization_strips_case_underscores_and_spaces() {
        assert_eq!(normalize_key("Full Name"), "fullname");
        assert_eq!(normalize_key("full_name"), "fullname");
        assert_eq!(normalize_key(" ROLL\tNo "), "rollno");
    }

    #[test]
    fn exact_match_beats_normalized_match() {
        let sample = row(json!({"full name": "normalized", "Full_Name": "exact"}));
        assert_eq!(resolve_sample_value("Full_Name", &sample), Some(&json!("exact")));
        assert_eq!(resolve_sample_value("FULLNAME", &sample), Some(&json!("normalized")));
        assert_eq!(resolve_sample_value("email", &sample), None);
    }

    #[test]
    fn photo_always_renders_placeholder() {
        let sample = row(json!({"photo": "https://img", "Photo": "x", "PHOTO": "y"}));
        for name in ["Photo", "photo", "PHOTO"] {
            assert_eq!(preview_content(name, Some(&sample)), PreviewContent::Photo);
            assert_eq!(preview_content(name, None), PreviewContent::Photo);
        }
    }

    #[test]
    fn preview_falls_back_to_field_name() {
        let sample = row(json!({"Roll No": 17, "Dept": "", "Blood": null}));
        assert_eq!(preview_content("roll_no", Some(&sample)), PreviewContent::Text("17".into()));
        assert_eq!(preview_content("dept", Some(&sample)), PreviewContent::Text("dept".into()));
        assert_eq!(preview_content("blood", Some(&sample)), PreviewContent::Text("blood".into()));
        assert_eq!(preview_content("email", None), PreviewContent::Text("email".into()));
    }

    #[test]
    fn preflight_accepts_normalized_matches() {
        let data = uploaded(&["Full Name", "Roll No"]);
        let result = preflight(&fields(&["full_name", "rollno"]), Some(&data));
        assert_eq!(result, Ok(&data));
    }

    #[test]
    fn preflight_requires_data_then_fields() {
        assert_eq!(preflight(&fields(&["x"]), None), Err(PreflightError::MissingData));
        let data = uploaded(&["Full Name"]);
        assert_eq!(preflight(&FieldSet::new(), Some(&data)), Err(PreflightError::NoFieldMappings));
    }

    #[test]
    fn preflight_reports_every_unmatched_field() {
        let data = uploaded(&["Full Name", "Roll No"]);
        let err = preflight(&fields(&["full_name", "photo", "dept", "Roll_No", "email"]), Some(&data))
            .unwrap_err();

        assert_eq!(
            err,
            PreflightError::UnmatchedFields(vec!["photo".into(), "dept".into(), "email".into()])
        );
        let message = err.to_string();
        for name in ["photo", "dept", "email"] {
            assert!(message.contains(name), "{message}");
        }
    }

    #[test]
    fn pretty_labels() {
        assert_eq!(pretty_label("full_name"), "Full name");
        assert_eq!(pretty_label("roll--no  x"), "Roll no x");
        assert_eq!(pretty_label("__"), "");
    }
}
