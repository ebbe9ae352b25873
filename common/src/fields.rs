//! In-session arena of field mappings keyed by local identifiers.
//!
//! The designer edits a [`FieldSet`]; the backend only ever sees the output of
//! [`FieldSet::to_mappings`], which drops the local ids.

use std::fmt;

use crate::geometry::Point;
use crate::model::template::{Alignment, FieldMapping};

/// Ephemeral identifier of a field within one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    pub id: FieldId,
    pub mapping: FieldMapping,
}

/// Ordered field records with ids that are never reused, even after
/// [`FieldSet::clear`] or [`FieldSet::replace_all`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSet {
    next_id: u64,
    records: Vec<FieldRecord>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mappings(mappings: impl IntoIterator<Item = FieldMapping>) -> Self {
        let mut set = Self::new();
        set.extend(mappings);
        set
    }

    fn allocate(&mut self) -> FieldId {
        self.next_id += 1;
        FieldId(self.next_id)
    }

    pub fn add(&mut self, mapping: FieldMapping) -> FieldId {
        let id = self.allocate();
        self.records.push(FieldRecord { id, mapping });
        id
    }

    pub fn extend(&mut self, mappings: impl IntoIterator<Item = FieldMapping>) {
        for mapping in mappings {
            self.add(mapping);
        }
    }

    /// Drops every record and seeds fresh ones from `mappings`.
    pub fn replace_all(&mut self, mappings: impl IntoIterator<Item = FieldMapping>) {
        self.records.clear();
        self.extend(mappings);
    }

    /// Moves a field; size and typography stay as they are.
    pub fn move_to(&mut self, id: FieldId, position: Point) -> bool {
        match self.get_mut(id) {
            Some(mapping) => {
                mapping.x = position.x;
                mapping.y = position.y;
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, id: FieldId, mapping: FieldMapping) -> bool {
        match self.get_mut(id) {
            Some(current) => {
                *current = mapping;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: FieldId) -> Option<FieldMapping> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index).mapping)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, id: FieldId) -> Option<&FieldMapping> {
        self.records.iter().find(|r| r.id == id).map(|r| &r.mapping)
    }

    fn get_mut(&mut self, id: FieldId) -> Option<&mut FieldMapping> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| &mut r.mapping)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.mapping.field_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The persisted form: mappings in order, local ids stripped.
    pub fn to_mappings(&self) -> Vec<FieldMapping> {
        self.records.iter().map(|r| r.mapping.clone()).collect()
    }
}

/// One edit made in the field settings sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Width(f64),
    Height(f64),
    FontSize(f64),
    Color(String),
    Alignment(Alignment),
}

impl FieldEdit {
    /// Applies the edit; non-finite or non-positive sizes are ignored.
    pub fn apply(self, mapping: &mut FieldMapping) {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match self {
            FieldEdit::Name(name) => mapping.field_name = name,
            FieldEdit::Width(v) if positive(v) => mapping.width = v,
            FieldEdit::Height(v) if positive(v) => mapping.height = v,
            FieldEdit::FontSize(v) if positive(v) => mapping.font_size = v,
            FieldEdit::Color(color) => mapping.font_color = color,
            FieldEdit::Alignment(alignment) => mapping.alignment = alignment,
            FieldEdit::Width(_) | FieldEdit::Height(_) | FieldEdit::FontSize(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn seeded() -> FieldSet {
        FieldSet::from_mappings(vec![
            FieldMapping::new_at("name", 10.0, 10.0),
            FieldMapping::new_at("dept", 10.0, 40.0),
        ])
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut set = seeded();
        let first: Vec<FieldId> = set.ids().collect();
        set.clear();
        let added = set.add(FieldMapping::new_at("email", 0.0, 0.0));
        assert!(!first.contains(&added));

        let mut seen = HashSet::new();
        for id in first.into_iter().chain([added]) {
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn move_changes_only_position() {
        let mut set = seeded();
        let id = set.ids().next().unwrap();
        let before = set.get(id).unwrap().clone();

        assert!(set.move_to(id, Point::new(300.0, 120.0)));
        let after = set.get(id).unwrap();
        assert_eq!((after.x, after.y), (300.0, 120.0));
        assert_eq!(
            FieldMapping { x: before.x, y: before.y, ..after.clone() },
            before
        );
    }

    #[test]
    fn projection_strips_ids_and_keeps_order() {
        let mut set = seeded();
        let dept = set.ids().nth(1).unwrap();
        set.remove(dept);
        set.add(FieldMapping::new_at("photo", 500.0, 20.0));

        let names: Vec<String> = set.to_mappings().into_iter().map(|m| m.field_name).collect();
        assert_eq!(names, vec!["name", "photo"]);
        let json = serde_json::to_string(&set.to_mappings()).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn replace_all_assigns_fresh_ids() {
        let mut set = FieldSet::from_mappings(
            (0..5).map(|i| FieldMapping::new_at(format!("old{i}"), 0.0, i as f64)),
        );
        let old: HashSet<FieldId> = set.ids().collect();
        set.replace_all(vec![
            FieldMapping::new_at("email", 1.0, 1.0),
            FieldMapping::new_at("dept", 2.0, 2.0),
        ]);

        assert_eq!(set.len(), 2);
        assert!(set.ids().all(|id| !old.contains(&id)));
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["email", "dept"]);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut set = seeded();
        let stale = set.add(FieldMapping::new_at("tmp", 0.0, 0.0));
        set.remove(stale);
        assert!(!set.move_to(stale, Point::new(1.0, 1.0)));
        assert!(!set.update(stale, FieldMapping::new_at("x", 0.0, 0.0)));
        assert_eq!(set.remove(stale), None);
    }

    #[test]
    fn edits_ignore_invalid_sizes() {
        let mut mapping = FieldMapping::new_at("name", 0.0, 0.0);
        FieldEdit::Width(240.0).apply(&mut mapping);
        FieldEdit::Height(-3.0).apply(&mut mapping);
        FieldEdit::FontSize(f64::NAN).apply(&mut mapping);
        FieldEdit::Alignment(Alignment::Right).apply(&mut mapping);

        assert_eq!(mapping.width, 240.0);
        assert_eq!(mapping.height, 20.0);
        assert_eq!(mapping.font_size, 12.0);
        assert_eq!(mapping.alignment, Alignment::Right);
    }
}
