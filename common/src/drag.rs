//! Pointer drag state machine and drop resolution for the field canvas.
//!
//! `Idle → Dragging { payload, origin, delta } → Dropped | Cancelled`.
//! The designer feeds pointer events into [`DragState`]; the canvas is the
//! only place that turns a [`Drop`] into a [`FieldMutation`] via
//! [`resolve_drop`].

use crate::fields::FieldId;
use crate::geometry::{Point, Rect, Size, clamp_to_template, client_to_template};
use crate::model::template::FieldMapping;

/// Pointer travel below which a release counts as a click, not a drop.
pub const ACTIVATION_DISTANCE: f64 = 3.0;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// A field box already on the template.
    Existing(FieldId),
    /// A column chip from the available-fields sidebar.
    Available(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        origin: Point,
        delta: Point,
        activated: bool,
    },
}

/// A completed drag: the payload and the absolute client-space release point.
#[derive(Debug, Clone, PartialEq)]
pub struct Drop {
    pub payload: DragPayload,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd {
    Dropped(Drop),
    Cancelled,
}

impl DragState {
    /// Starts a drag from a pointer-down at `origin`. Ignored mid-drag.
    pub fn begin(&mut self, payload: DragPayload, origin: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = DragState::Dragging {
            payload,
            origin,
            delta: Point::default(),
            activated: false,
        };
        true
    }

    /// Records the pointer's current position as a delta from the origin.
    pub fn track(&mut self, pointer: Point) {
        if let DragState::Dragging { origin, delta, activated, .. } = self {
            *delta = pointer.delta_from(*origin);
            *activated |= delta.length() >= ACTIVATION_DISTANCE;
        }
    }

    /// Ends the drag. A drag that never travelled far enough is a click and
    /// ends as [`DragEnd::Cancelled`].
    pub fn release(&mut self) -> Option<DragEnd> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging { activated: false, .. } => Some(DragEnd::Cancelled),
            DragState::Dragging { payload, origin, delta, .. } => Some(DragEnd::Dropped(Drop {
                payload,
                point: origin.offset(delta),
            })),
        }
    }

    pub fn cancel(&mut self) -> Option<DragEnd> {
        match std::mem::take(self) {
            DragState::Idle => None,
            DragState::Dragging { .. } => Some(DragEnd::Cancelled),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Dragging far enough to show the overlay and drop hints.
    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging { activated: true, .. })
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        match self {
            DragState::Dragging { payload, .. } => Some(payload),
            DragState::Idle => None,
        }
    }

    /// Offset applied to the dragged item while it follows the pointer.
    pub fn delta(&self) -> Point {
        match self {
            DragState::Dragging { delta, .. } => *delta,
            DragState::Idle => Point::default(),
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        match self {
            DragState::Dragging { origin, delta, .. } => Some(origin.offset(*delta)),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging_field(&self, id: FieldId) -> bool {
        matches!(self.payload(), Some(DragPayload::Existing(dragged)) if *dragged == id)
    }
}

/// The change a drop makes to the designer's field set.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMutation {
    Move { id: FieldId, position: Point },
    Add(FieldMapping),
}

/// Turns a drop into a template-space mutation.
///
/// `canvas` is the rendered template's client rectangle. Drops outside it
/// produce nothing. The position is clamped with the default 100×20 box for
/// both new and repositioned fields; a wider field moved near the right edge
/// can therefore still overflow the template.
pub fn resolve_drop(drop: &Drop, canvas: &Rect, template: Size, scale: f64) -> Option<FieldMutation> {
    if !canvas.contains(drop.point) {
        return None;
    }
    let raw = client_to_template(drop.point, canvas.origin(), scale);
    let position = clamp_to_template(raw, template);

    Some(match &drop.payload {
        DragPayload::Existing(id) => FieldMutation::Move { id: *id, position },
        DragPayload::Available(name) => {
            FieldMutation::Add(FieldMapping::new_at(name.clone(), position.x, position.y))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldSet;
    use crate::geometry::fit_scale;
    use crate::model::template::{Alignment, DEFAULT_FIELD_WIDTH};
    use pretty_assertions::assert_eq;

    const TEMPLATE: Size = Size::new(1000.0, 600.0);

    fn canvas() -> Rect {
        // 1000x600 rendered at 0.5 with its corner at (120, 80).
        Rect::new(120.0, 80.0, 500.0, 300.0)
    }

    fn drag(payload: DragPayload, from: Point, to: Point) -> Drop {
        let mut state = DragState::default();
        assert!(state.begin(payload, from));
        state.track(Point::new(from.x + 1.0, from.y));
        state.track(to);
        match state.release() {
            Some(DragEnd::Dropped(drop)) => drop,
            other => panic!("expected a drop, got {other:?}"),
        }
    }

    #[test]
    fn drop_point_is_origin_plus_delta() {
        let drop = drag(
            DragPayload::Available("name".into()),
            Point::new(40.0, 200.0),
            Point::new(300.0, 150.0),
        );
        assert_eq!(drop.point, Point::new(300.0, 150.0));
    }

    #[test]
    fn corner_drop_is_clamped_to_default_box() {
        let scale = fit_scale(Size::new(500.0, 500.0), TEMPLATE);
        assert_eq!(scale, 0.5);

        let drop = drag(
            DragPayload::Available("full_name".into()),
            Point::new(10.0, 10.0),
            Point::new(120.0 + 950.0 * scale, 80.0 + 580.0 * scale),
        );
        let mutation = resolve_drop(&drop, &canvas(), TEMPLATE, scale);

        let mut expected = FieldMapping::new_at("full_name", 900.0, 580.0);
        expected.alignment = Alignment::Left;
        assert_eq!(mutation, Some(FieldMutation::Add(expected)));
    }

    #[test]
    fn new_fields_get_fixed_defaults() {
        let drop = Drop {
            payload: DragPayload::Available("dept".into()),
            point: Point::new(130.0, 90.0),
        };
        let Some(FieldMutation::Add(field)) = resolve_drop(&drop, &canvas(), TEMPLATE, 0.5) else {
            panic!("expected an added field");
        };
        assert_eq!((field.x, field.y), (20.0, 20.0));
        assert_eq!((field.width, field.height, field.font_size), (100.0, 20.0, 12.0));
        assert_eq!(field.font_color, "#000000");
        assert_eq!(field.alignment, Alignment::Left);
    }

    #[test]
    fn drop_outside_canvas_is_a_no_op() {
        let drop = Drop {
            payload: DragPayload::Available("dept".into()),
            point: Point::new(900.0, 90.0),
        };
        assert_eq!(resolve_drop(&drop, &canvas(), TEMPLATE, 0.5), None);
    }

    #[test]
    fn existing_drop_only_moves_the_field() {
        let mut fields = FieldSet::new();
        let mut original = FieldMapping::new_at("name", 10.0, 10.0);
        original.width = 180.0;
        original.font_size = 18.0;
        original.font_color = "#aa0000".into();
        original.alignment = Alignment::Center;
        let id = fields.add(original.clone());

        let drop = Drop { payload: DragPayload::Existing(id), point: Point::new(220.0, 130.0) };
        let Some(FieldMutation::Move { id: moved, position }) =
            resolve_drop(&drop, &canvas(), TEMPLATE, 0.5)
        else {
            panic!("expected a move");
        };
        assert_eq!(moved, id);
        fields.move_to(moved, position);

        let after = fields.get(id).unwrap();
        assert_eq!((after.x, after.y), (200.0, 100.0));
        assert_eq!(FieldMapping { x: original.x, y: original.y, ..after.clone() }, original);
    }

    #[test]
    fn repositioning_wide_field_uses_default_bounds() {
        // Known behavior: the clamp ignores the field's own width, so a wide
        // field dropped at the right edge extends past the template.
        let mut fields = FieldSet::new();
        let mut wide = FieldMapping::new_at("address", 0.0, 0.0);
        wide.width = 400.0;
        let id = fields.add(wide);

        let drop = Drop { payload: DragPayload::Existing(id), point: Point::new(619.0, 100.0) };
        let Some(FieldMutation::Move { position, .. }) = resolve_drop(&drop, &canvas(), TEMPLATE, 0.5)
        else {
            panic!("expected a move");
        };
        fields.move_to(id, position);

        let moved = fields.get(id).unwrap();
        assert_eq!(moved.x, TEMPLATE.width - DEFAULT_FIELD_WIDTH);
        assert!(moved.x + moved.width > TEMPLATE.width);
    }

    #[test]
    fn short_drags_are_clicks() {
        let mut state = DragState::default();
        state.begin(DragPayload::Available("dept".into()), Point::new(5.0, 5.0));
        state.track(Point::new(6.0, 6.0));
        assert!(!state.is_active());
        assert_eq!(state.release(), Some(DragEnd::Cancelled));
        assert_eq!(state, DragState::Idle);
    }

    #[test]
    fn cancel_and_double_begin() {
        let mut state = DragState::default();
        assert_eq!(state.release(), None);
        assert!(state.begin(DragPayload::Available("a".into()), Point::default()));
        assert!(!state.begin(DragPayload::Available("b".into()), Point::default()));
        assert_eq!(state.payload(), Some(&DragPayload::Available("a".into())));
        assert_eq!(state.cancel(), Some(DragEnd::Cancelled));
        assert!(!state.is_dragging());
    }
}
