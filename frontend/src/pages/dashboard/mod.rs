//! Dashboard: templates, generation history and the running totals.
//!
//! Templates and history are requested together on first render. While any
//! history entry is pending or processing, an interval polls its status and
//! merges the answer into the table; the interval is dropped as soon as no
//! entry is active or the page unmounts.

use futures_util::future::try_join;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::DashboardPage;

use super::PageProps;
use crate::api::{generation, templates};

impl Component for DashboardPage {
    type Message = Msg;
    type Properties = PageProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DashboardPage::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let api = ctx.props().app.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = try_join(templates::list(&api), generation::history(&api)).await;
                link.send_message(Msg::Loaded(result));
            });
        }
    }
}
