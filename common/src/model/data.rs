use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One spreadsheet row keyed by column header, in column order.
pub type SampleRow = Map<String, Value>;

/// Response of `POST /data/preview`: the parsed header and a bounded sample.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPreview {
    #[serde(default, deserialize_with = "super::string_list")]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sample_data: Vec<SampleRow>,
    #[serde(default)]
    pub total_rows: u64,
}

impl DataPreview {
    pub fn first_row(&self) -> Option<&SampleRow> {
        self.sample_data.first()
    }
}

/// The uploaded file kept inline so it can be re-sent at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// The record held in tab-scoped storage after a data upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDataFile {
    pub file: StoredFile,
    pub preview: DataPreview,
}

impl UploadedDataFile {
    pub fn columns(&self) -> &[String] {
        &self.preview.columns
    }
}

/// Response of `POST /data/validate`.
///
/// The backend's report is loosely shaped; unknown keys are ignored and
/// missing ones default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(default)]
    pub valid: bool,
    #[serde(default, alias = "missing_columns")]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_keeps_column_order_and_stringifies_headers() {
        let json = r#"{
            "columns": ["Roll No", 2024, "Full Name"],
            "sample_data": [{"Roll No": 7, "2024": null, "Full Name": "Asha"}],
            "total_rows": 120
        }"#;
        let preview: DataPreview = serde_json::from_str(json).unwrap();

        assert_eq!(preview.columns, vec!["Roll No", "2024", "Full Name"]);
        let keys: Vec<&String> = preview.first_row().unwrap().keys().collect();
        assert_eq!(keys, vec!["Roll No", "2024", "Full Name"]);
        assert_eq!(preview.total_rows, 120);
    }

    #[test]
    fn stored_record_uses_browser_field_names() {
        let record = UploadedDataFile {
            file: StoredFile {
                name: "staff.csv".into(),
                mime_type: "text/csv".into(),
                data_url: "data:text/csv;base64,YQ==".into(),
            },
            preview: DataPreview::default(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["file"]["type"], "text/csv");
        assert_eq!(value["file"]["dataUrl"], "data:text/csv;base64,YQ==");
    }

    #[test]
    fn validation_report_tolerates_partial_bodies() {
        let report: ValidationReport =
            serde_json::from_str(r#"{"missing_columns": ["photo"]}"#).unwrap();
        assert!(!report.valid);
        assert_eq!(report.missing_fields, vec!["photo"]);
    }
}
