use common::model::data::{DataPreview, ValidationReport};
use web_sys::{File, FormData};

use super::{browser_error, ApiClient, ApiError};

fn file_form(file: &File) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(browser_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(browser_error)?;
    Ok(form)
}

/// Parses the spreadsheet server-side and returns its header and sample rows.
pub async fn preview(api: &ApiClient, file: &File) -> Result<DataPreview, ApiError> {
    api.post_form("data/preview", file_form(file)?).await
}

/// Checks that the spreadsheet carries every column in `required_fields`.
pub async fn validate(
    api: &ApiClient,
    file: &File,
    required_fields: &[String],
) -> Result<ValidationReport, ApiError> {
    let form = file_form(file)?;
    let fields =
        serde_json::to_string(required_fields).map_err(|e| ApiError::Decode(e.to_string()))?;
    form.append_with_str("required_fields", &fields)
        .map_err(browser_error)?;
    api.post_form("data/validate", form).await
}
