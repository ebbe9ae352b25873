use common::fields::FieldId;
use common::geometry::Point;

pub enum Msg {
    /// Re-read the container size.
    Measure,
    PointerDown(FieldId, Point),
    Edit(FieldId),
}
