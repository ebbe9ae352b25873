use common::drag::{DragPayload, FieldMutation};
use common::fields::FieldId;
use common::geometry::Point;
use common::model::template::{FieldMapping, Template};

use crate::api::ApiError;

pub enum Msg {
    TemplateLoaded(Result<Template, ApiError>),
    /// The uploaded-data store changed.
    DataChanged,

    DragStart(DragPayload, Point),
    DragMove(Point),
    DragRelease,
    DragCancel,
    /// A drop resolved by the canvas.
    Mutate(FieldMutation),

    EditField(FieldId),
    UpdateField(FieldMapping),
    CloseSettings,
    RemoveField(FieldId),
    ClearFields,

    Save,
    Saved(Result<(), ApiError>),
    SuggestPlacement,
    PlacementSuggested(Result<Vec<FieldMapping>, ApiError>),
    Generate,
    GenerationStarted(Result<(), ApiError>),
}
