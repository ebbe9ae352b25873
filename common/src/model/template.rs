use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Width of a freshly dropped field box, in template pixels.
pub const DEFAULT_FIELD_WIDTH: f64 = 100.0;
/// Height of a freshly dropped field box, in template pixels.
pub const DEFAULT_FIELD_HEIGHT: f64 = 20.0;
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_FONT_COLOR: &str = "#000000";

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn default_font_color() -> String {
    DEFAULT_FONT_COLOR.to_string()
}

/// Horizontal text alignment inside a field box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Alignment> {
        Alignment::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// A named rectangle on a template bound to a data column.
///
/// Coordinates and sizes are in template space (native image pixels). This is
/// exactly what the backend stores; the client-side local id lives in
/// [`crate::fields::FieldRecord`] and never reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field_name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default)]
    pub alignment: Alignment,
}

fn default_width() -> f64 {
    DEFAULT_FIELD_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_FIELD_HEIGHT
}

impl FieldMapping {
    /// A new field at `(x, y)` with the default box and typography.
    pub fn new_at(field_name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            field_name: field_name.into(),
            x,
            y,
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            font_color: DEFAULT_FONT_COLOR.to_string(),
            alignment: Alignment::Left,
        }
    }
}

/// A card template as returned by `GET /templates/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub template_url: String,
    pub template_width: f64,
    pub template_height: f64,
    #[serde(default)]
    pub field_mappings: Vec<FieldMapping>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Template {
    pub fn size(&self) -> Size {
        Size::new(self.template_width, self.template_height)
    }
}

/// Body of `PUT /templates/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateUpdate {
    pub field_mappings: Vec<FieldMapping>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn template_accepts_numeric_id_and_sparse_mappings() {
        let json = r#"{
            "id": 42,
            "name": "Student card",
            "template_url": "https://cdn.example/card.png",
            "template_width": 1000,
            "template_height": 600,
            "field_mappings": [{"field_name": "name", "x": 10, "y": 20}]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();

        assert_eq!(template.id, "42");
        assert_eq!(template.description, None);
        assert_eq!(template.field_mappings, vec![FieldMapping::new_at("name", 10.0, 20.0)]);
    }

    #[test]
    fn alignment_serializes_lowercase() {
        let mut field = FieldMapping::new_at("dept", 1.0, 2.0);
        field.alignment = Alignment::Center;
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["alignment"], "center");
        assert_eq!(value["font_color"], "#000000");
    }

    #[test]
    fn alignment_parse_is_case_insensitive() {
        assert_eq!(Alignment::parse("Right"), Some(Alignment::Right));
        assert_eq!(Alignment::parse("justify"), None);
    }
}
