//! Routed views. Each page receives the [`AppContext`] from the root component.

pub mod dashboard;
pub mod data_upload;
pub mod designer;
pub mod login;
pub mod register;
pub mod template_upload;

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::context::AppContext;

#[derive(Properties, PartialEq, Clone)]
pub struct PageProps {
    pub app: AppContext,
}

pub(crate) fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub(crate) fn textarea_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub(crate) fn select_value(e: Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Label, input and the inline validation message under it.
pub(crate) fn text_field(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    value: &str,
    error: Option<&'static str>,
    oninput: Callback<InputEvent>,
) -> Html {
    html! {
        <div class="form-field">
            <label for={id}>{ label }</label>
            <input
                {id}
                type={input_type}
                class={classes!("input", error.is_some().then_some("input-error"))}
                value={value.to_string()}
                {oninput}
            />
            { field_error(error) }
        </div>
    }
}

pub(crate) fn field_error(error: Option<&'static str>) -> Html {
    match error {
        Some(message) => html! { <p class="field-error">{ message }</p> },
        None => html! {},
    }
}

/// `<option>`s for `(value, label)` pairs with a leading placeholder.
pub(crate) fn select_options(
    placeholder: &'static str,
    options: &[(&'static str, &'static str)],
    selected: &str,
) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()}>{ placeholder }</option>
            { for options.iter().map(|(value, label)| html! {
                <option value={*value} selected={*value == selected}>{ *label }</option>
            }) }
        </>
    }
}
