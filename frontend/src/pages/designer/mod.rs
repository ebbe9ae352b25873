//! Template designer: the canvas, the available-field chips, the mapping list,
//! the live preview and the save / AI placement / generate actions.
//!
//! Responsibilities
//! - Load the template on first render and seed the [`FieldSet`] from its
//!   saved mappings. A failed load returns to the dashboard.
//! - Own the drag state. Window `pointermove`/`pointerup` listeners exist only
//!   while a drag is in progress; a finished drop is handed to the canvas as a
//!   numbered [`DropEvent`](crate::components::canvas::DropEvent).
//! - Follow the uploaded-data store for the available columns.
//! - Track unsaved changes with an MD5 of the serialized mappings and guard
//!   page unload while they differ from the last save.
//!
//! [`FieldSet`]: common::fields::FieldSet

use yew::platform::spawn_local;
use yew::prelude::*;

mod field_settings;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DesignerProps;
pub use state::DesignerPage;

use crate::api::templates;
use crate::helpers::set_window_dirty_flag;

impl Component for DesignerPage {
    type Message = Msg;
    type Properties = DesignerProps;

    fn create(ctx: &Context<Self>) -> Self {
        DesignerPage::new(ctx.props().app.uploads.current())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let app = &ctx.props().app;
        self.store_subscription = Some(
            app.uploads
                .subscribe(ctx.link().callback(|_| Msg::DataChanged)),
        );
        self.unload_guard = state::unload_guard();

        let api = app.api.clone();
        let id = ctx.props().template_id.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::TemplateLoaded(templates::get(&api, &id).await));
        });
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        set_window_dirty_flag(false);
    }
}
