use common::model::generation::{GenerationJob, JobProgress};
use common::model::template::FieldMapping;
use web_sys::{File, FormData};

use super::{browser_error, ApiClient, ApiError};

/// Starts a generation job. The response shape is not relied on.
pub async fn generate(
    api: &ApiClient,
    template_id: &str,
    field_mappings: &[FieldMapping],
    file: &File,
) -> Result<(), ApiError> {
    let mappings =
        serde_json::to_string(field_mappings).map_err(|e| ApiError::Decode(e.to_string()))?;
    let form = FormData::new().map_err(browser_error)?;
    form.append_with_str("template_id", template_id)
        .map_err(browser_error)?;
    form.append_with_str("field_mappings", &mappings)
        .map_err(browser_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(browser_error)?;
    api.post_form_unit("generation/generate", form).await
}

pub async fn history(api: &ApiClient) -> Result<Vec<GenerationJob>, ApiError> {
    api.get_json("generation/history").await
}

pub async fn status(api: &ApiClient, id: &str) -> Result<JobProgress, ApiError> {
    api.get_json(&format!("generation/status/{id}")).await
}

/// The finished document as raw bytes.
pub async fn download(api: &ApiClient, id: &str) -> Result<Vec<u8>, ApiError> {
    api.get_bytes(&format!("generation/download/{id}")).await
}
