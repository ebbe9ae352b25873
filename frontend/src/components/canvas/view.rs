use common::drag::DragPayload;
use common::fields::FieldRecord;
use common::geometry::{field_box, Point, CANVAS_LABEL};
use common::model::template::Template;
use yew::prelude::*;

use super::messages::Msg;
use super::state::FieldCanvas;

pub fn view(canvas: &FieldCanvas, ctx: &Context<FieldCanvas>) -> Html {
    let props = ctx.props();
    let body = match &props.template {
        Some(template) => build_surface(canvas, ctx, template),
        None => build_empty_state(),
    };

    html! {
        <div class="canvas-container" ref={canvas.container_ref.clone()}>
            { body }
        </div>
    }
}

fn build_empty_state() -> Html {
    html! {
        <div class="canvas-empty">
            <span class="material-icons">{"image"}</span>
            <p class="canvas-empty-title">{"No template selected"}</p>
            <p class="hint">{"Upload a template to start designing"}</p>
        </div>
    }
}

fn build_surface(canvas: &FieldCanvas, ctx: &Context<FieldCanvas>, template: &Template) -> Html {
    let props = ctx.props();
    let scale = canvas.scale(props);
    let size = template.size().scaled(scale);

    let is_over = props.drag.is_active()
        && props
            .drag
            .pointer()
            .zip(canvas.surface_rect())
            .is_some_and(|(pointer, rect)| rect.contains(pointer));
    let dropping_new = matches!(props.drag.payload(), Some(DragPayload::Available(_)));

    html! {
        <div
            ref={canvas.surface_ref.clone()}
            class={classes!("canvas-surface", is_over.then_some("is-over"))}
            style={format!("width:{}px;height:{}px;", size.width, size.height)}
        >
            <img
                class="canvas-image"
                src={template.template_url.clone()}
                alt={template.name.clone()}
                draggable="false"
            />
            { for props.fields.iter().map(|record| build_field(ctx, record, scale)) }
            if is_over && dropping_new {
                <div class="drop-indicator">{"Drop field here"}</div>
            }
        </div>
    }
}

fn build_field(ctx: &Context<FieldCanvas>, record: &FieldRecord, scale: f64) -> Html {
    let link = ctx.link();
    let drag = &ctx.props().drag;
    let field = &record.mapping;
    let id = record.id;
    let rect = field_box(field, scale);

    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;font-size:{}px;color:{};text-align:{};",
        rect.left,
        rect.top,
        rect.width,
        rect.height,
        CANVAS_LABEL.px(field.font_size, scale),
        field.font_color,
        field.alignment.as_str(),
    );
    let dragging = drag.is_active() && drag.is_dragging_field(id);
    if dragging {
        let delta = drag.delta();
        style.push_str(&format!(
            "transform:translate({}px,{}px);opacity:0.5;",
            delta.x, delta.y
        ));
    }

    let onpointerdown = link.batch_callback(move |e: PointerEvent| {
        if e.button() != 0 {
            return None;
        }
        e.prevent_default();
        e.stop_propagation();
        Some(Msg::PointerDown(
            id,
            Point::new(e.client_x() as f64, e.client_y() as f64),
        ))
    });
    let ondblclick = link.callback(move |e: MouseEvent| {
        e.stop_propagation();
        Msg::Edit(id)
    });

    html! {
        <div
            key={id.to_string()}
            class={classes!("canvas-field", dragging.then_some("dragging"))}
            title={format!("{} (double-click to edit)", field.field_name)}
            {style}
            {onpointerdown}
            {ondblclick}
        >
            { field.field_name.clone() }
        </div>
    }
}
