use common::drag::{self, DragPayload, DragState, FieldMutation};
use common::fields::{FieldId, FieldSet};
use common::geometry::Point;
use common::model::template::Template;
use yew::prelude::*;

/// A finished drop passed down from the designer.
///
/// `seq` grows with every drop so the canvas resolves each one exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    pub seq: u64,
    pub drop: drag::Drop,
}

#[derive(Properties, PartialEq, Clone)]
pub struct CanvasProps {
    /// `None` shows the empty state and ignores drops.
    pub template: Option<Template>,
    pub fields: FieldSet,
    /// Drag in progress, owned by the designer.
    pub drag: DragState,
    #[prop_or_default]
    pub drop: Option<DropEvent>,
    /// Pointer-down on a field box, with the client-space origin.
    pub on_drag_start: Callback<(DragPayload, Point)>,
    /// A drop that landed on the template.
    pub on_mutation: Callback<FieldMutation>,
    /// Double-click on a field box.
    pub on_field_edit: Callback<FieldId>,
}
