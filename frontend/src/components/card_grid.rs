use yew::{html, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct CardGridProps {
    pub columns: usize,
    /// Gap between cells in pixels.
    #[prop_or(24)]
    pub gap: u32,
    pub children: Children,
}

/// Responsive grid of equally sized cards; collapses to one column on narrow
/// screens through the `card-grid` class.
pub struct CardGrid;

impl Component for CardGrid {
    type Message = ();
    type Properties = CardGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CardGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "grid-template-columns: repeat({}, minmax(0, 1fr)); gap: {}px;",
            props.columns.max(1),
            props.gap
        );

        html! {
            <div class="card-grid" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
