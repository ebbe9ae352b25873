use common::drag::DragPayload;
use yew::prelude::*;

use super::messages::Msg;
use super::state::FieldCanvas;

pub fn update(canvas: &mut FieldCanvas, ctx: &Context<FieldCanvas>, msg: Msg) -> bool {
    match msg {
        Msg::Measure => match canvas.measure_container() {
            Some(size) if size != canvas.container => {
                canvas.container = size;
                true
            }
            _ => false,
        },
        Msg::PointerDown(id, origin) => {
            ctx.props()
                .on_drag_start
                .emit((DragPayload::Existing(id), origin));
            false
        }
        Msg::Edit(id) => {
            ctx.props().on_field_edit.emit(id);
            false
        }
    }
}
