//! Template endpoints: listing, upload, mapping updates and the AI helpers.

use common::model::suggestion::{
    DesignSuggestion, DesignSuggestionRequest, DesignSuggestions, FieldPlacement,
    FieldPlacementRequest,
};
use common::model::template::{FieldMapping, Template, TemplateUpdate};
use web_sys::{File, FormData};

use super::{browser_error, ApiClient, ApiError};

pub async fn list(api: &ApiClient) -> Result<Vec<Template>, ApiError> {
    api.get_json("templates/").await
}

pub async fn get(api: &ApiClient, id: &str) -> Result<Template, ApiError> {
    api.get_json(&format!("templates/{id}")).await
}

/// Replaces the stored mappings of a template.
pub async fn update(
    api: &ApiClient,
    id: &str,
    field_mappings: Vec<FieldMapping>,
) -> Result<(), ApiError> {
    api.put_json(&format!("templates/{id}"), &TemplateUpdate { field_mappings })
        .await
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&format!("templates/{id}")).await
}

pub async fn upload(
    api: &ApiClient,
    file: &File,
    name: &str,
    description: Option<&str>,
) -> Result<Template, ApiError> {
    let form = FormData::new().map_err(browser_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(browser_error)?;
    form.append_with_str("name", name).map_err(browser_error)?;
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        form.append_with_str("description", description)
            .map_err(browser_error)?;
    }
    api.post_form("templates/upload", form).await
}

pub async fn design_suggestions(
    api: &ApiClient,
    request: &DesignSuggestionRequest,
) -> Result<Vec<DesignSuggestion>, ApiError> {
    let response: DesignSuggestions = api.post_json("templates/ai-suggestions", request).await?;
    Ok(response.suggestions)
}

/// Asks the backend to lay out `fields` on the template.
pub async fn field_placement(
    api: &ApiClient,
    id: &str,
    fields: Vec<String>,
) -> Result<Vec<FieldMapping>, ApiError> {
    let response: FieldPlacement = api
        .post_json(
            &format!("templates/{id}/ai-field-placement"),
            &FieldPlacementRequest { fields },
        )
        .await?;
    Ok(response.field_suggestions)
}
