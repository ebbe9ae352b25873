use std::fmt::Debug;

use gloo_timers::callback::Timeout;
use log::warn;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

/// A sheet that slides down from the top of the viewport when it carries the
/// `show` class.
pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

const SHOW_CLASS: &str = "show";
const TRANSITION_DELAY_MS: u32 = 50;

/// Adds `show` after a short delay so freshly rendered content transitions in.
pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle(top_sheet_ref, false);
}

fn toggle(top_sheet_ref: NodeRef, show: bool) {
    let timeout = Timeout::new(TRANSITION_DELAY_MS, move || {
        if let Some(sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
            let classes = sheet.class_list();
            let result = if show {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
            report_class_change(result, show);
        }
    });
    timeout.forget();
}

/// Logs a failed class change; returns whether the sheet is in the requested
/// state.
fn report_class_change<E: Debug>(result: Result<(), E>, show: bool) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            let action = if show { "open" } else { "close" };
            warn!("could not {action} top sheet: {err:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_class_change_is_reported() {
        assert!(report_class_change::<&str>(Ok(()), true));
        assert!(!report_class_change(Err("SyntaxError"), true));
        assert!(!report_class_change(Err("InvalidCharacterError"), false));
    }
}
