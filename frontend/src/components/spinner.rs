use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
    /// Fill the viewport and center, used while a page loads.
    #[prop_or_default]
    pub full_page: bool,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class={classes!("spinner-wrap", props.full_page.then_some("full-page"))}>
            <div class="spinner"></div>
            if let Some(label) = &props.label {
                <span class="spinner-label">{ label.clone() }</span>
            }
        </div>
    }
}
