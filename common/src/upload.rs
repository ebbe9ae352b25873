//! Client-side file checks and the data-URL encoding used to keep an uploaded
//! spreadsheet in tab storage.

use base64::{Engine as _, engine::general_purpose};

use crate::error::{DataUrlError, UploadRuleError};

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted MIME types and size ceiling for one kind of upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    pub mime_types: &'static [&'static str],
    /// Value for the file input's `accept` attribute.
    pub accept: &'static str,
    pub max_bytes: u64,
    pub hint: &'static str,
    pub type_message: &'static str,
}

pub const TEMPLATE_IMAGE: FileRules = FileRules {
    mime_types: &["image/jpeg", "image/png", "image/jpg"],
    accept: ".png,.jpg,.jpeg",
    max_bytes: MAX_UPLOAD_BYTES,
    hint: "PNG, JPG, JPEG up to 10MB",
    type_message: "Please upload only PNG, JPG, or JPEG files",
};

pub const DATA_SHEET: FileRules = FileRules {
    mime_types: &[
        "text/csv",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "application/vnd.ms-excel",
    ],
    accept: ".csv,.xlsx,.xls",
    max_bytes: MAX_UPLOAD_BYTES,
    hint: "CSV or Excel files up to 10MB",
    type_message: "Please upload only CSV or Excel files",
};

impl FileRules {
    pub fn check(&self, mime_type: &str, size: u64) -> Result<(), UploadRuleError> {
        if !self.mime_types.contains(&mime_type) {
            return Err(UploadRuleError::UnsupportedType(self.type_message));
        }
        if size > self.max_bytes {
            return Err(UploadRuleError::TooLarge {
                limit_label: format_file_size(self.max_bytes).replace(' ', ""),
            });
        }
        Ok(())
    }
}

/// Human readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    let mut whole = bytes;
    while whole >= 1024 && exponent < UNITS.len() - 1 {
        whole /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

pub fn file_kind_label(mime_type: &str) -> &'static str {
    if mime_type == "text/csv" { "CSV File" } else { "Excel File" }
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() { "application/octet-stream" } else { mime_type };
    format!("data:{};base64,{}", mime_type, general_purpose::STANDARD.encode(bytes))
}

/// Splits a base64 data URL into its MIME type and decoded bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingPrefix)?;
    let (meta, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPrefix)?;
    let mime_type = meta
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    Ok((mime_type.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn template_rules_accept_images_only() {
        assert_eq!(TEMPLATE_IMAGE.check("image/png", 2048), Ok(()));
        assert_eq!(
            TEMPLATE_IMAGE.check("image/gif", 10),
            Err(UploadRuleError::UnsupportedType("Please upload only PNG, JPG, or JPEG files"))
        );
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert_eq!(DATA_SHEET.check("text/csv", MAX_UPLOAD_BYTES), Ok(()));
        let err = DATA_SHEET.check("text/csv", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn sizes_format_with_binary_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(MAX_UPLOAD_BYTES), "10 MB");
    }

    #[test]
    fn data_url_decodes_to_original_bytes() {
        let bytes = b"Full Name,Roll No\nAsha,7\n";
        let url = encode_data_url("text/csv", bytes);
        assert!(url.starts_with("data:text/csv;base64,"));
        assert_eq!(decode_data_url(&url), Ok(("text/csv".to_string(), bytes.to_vec())));
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        assert_eq!(decode_data_url("text/csv,abc"), Err(DataUrlError::MissingPrefix));
        assert_eq!(decode_data_url("data:text/csv,a,b"), Err(DataUrlError::NotBase64));
        assert!(matches!(decode_data_url("data:text/csv;base64,@@@"), Err(DataUrlError::Decode(_))));
    }

    #[test]
    fn excel_and_csv_labels() {
        assert_eq!(file_kind_label("text/csv"), "CSV File");
        assert_eq!(file_kind_label("application/vnd.ms-excel"), "Excel File");
    }
}
