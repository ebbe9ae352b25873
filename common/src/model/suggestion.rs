use serde::{Deserialize, Serialize};

use super::template::FieldMapping;

/// Body of `POST /templates/ai-suggestions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSuggestionRequest {
    pub organization_type: String,
    pub card_purpose: String,
    pub template_description: String,
}

/// A single design hint produced for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSuggestion {
    #[serde(default)]
    pub category: String,
    pub suggestion: String,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DesignSuggestions {
    #[serde(default)]
    pub suggestions: Vec<DesignSuggestion>,
}

/// Body of `POST /templates/{id}/ai-field-placement`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPlacementRequest {
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldPlacement {
    #[serde(default)]
    pub field_suggestions: Vec<FieldMapping>,
}
