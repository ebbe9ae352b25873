//! Field-mapping canvas: the template image at a fitted scale with the field
//! boxes drawn over it.
//!
//! The canvas owns no field data. It reports drag starts and double-clicks to
//! the designer, and it is the one place where a finished drop becomes a
//! [`FieldMutation`](common::drag::FieldMutation): the designer hands each drop
//! down as a numbered [`DropEvent`] and the canvas resolves it against its own
//! rendered rectangle in `changed`.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{CanvasProps, DropEvent};
pub use state::FieldCanvas;

impl Component for FieldCanvas {
    type Message = Msg;
    type Properties = CanvasProps;

    fn create(_ctx: &Context<Self>) -> Self {
        FieldCanvas::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if let Some(event) = &props.drop {
            if event.seq > self.last_drop_seq {
                self.last_drop_seq = event.seq;
                self.resolve(ctx, event);
            }
        }
        let template_changed = props.template.as_ref().map(|t| &t.id)
            != old_props.template.as_ref().map(|t| &t.id);
        if template_changed {
            ctx.link().send_message(Msg::Measure);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.listen_resize(ctx.link().callback(|_: ()| Msg::Measure));
            ctx.link().send_message(Msg::Measure);
        }
    }
}
