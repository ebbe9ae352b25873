use common::drag::DragPayload;
use common::geometry::Point;
use common::matching::pretty_label;
use common::route::Route;
use yew::html::Scope;
use yew::prelude::*;

use super::field_settings::FieldSettings;
use super::messages::Msg;
use super::state::DesignerPage;
use crate::components::canvas::FieldCanvas;
use crate::components::preview_card::PreviewCard;
use crate::components::spinner::Spinner;
use crate::components::top_sheet::TopSheet;

pub fn view(page: &DesignerPage, ctx: &Context<DesignerPage>) -> Html {
    if page.template.is_none() {
        return html! { <Spinner label="Loading template..." full_page={true} /> };
    }
    let link = ctx.link();

    html! {
        <div class={classes!("page", "designer", page.drag.is_active().then_some("is-dragging"))}>
            { build_toolbar(page, ctx) }
            if ctx.props().step.as_deref() == Some("mapping") && page.uploaded.is_some() {
                <div class="banner">
                    <span class="material-icons">{"info"}</span>
                    {"Drag the columns from Available Fields onto the template, then save or generate."}
                </div>
            }
            <div class="designer-layout">
                <aside class="designer-side">
                    { build_available_fields(page, ctx) }
                </aside>
                <main class="designer-main">
                    <div class="card">
                        <h3 class="card-title">{"Template Designer"}</h3>
                        <FieldCanvas
                            template={page.template.clone()}
                            fields={page.fields.clone()}
                            drag={page.drag.clone()}
                            drop={page.drop.clone()}
                            on_drag_start={link.callback(|(payload, origin): (DragPayload, Point)| Msg::DragStart(payload, origin))}
                            on_mutation={link.callback(Msg::Mutate)}
                            on_field_edit={link.callback(Msg::EditField)}
                        />
                    </div>
                    { build_mapping_list(page, link) }
                </main>
                <aside class="designer-side">
                    <PreviewCard
                        template={page.template.clone()}
                        fields={page.fields.clone()}
                        sample={page.uploaded.as_ref().and_then(|u| u.preview.first_row().cloned())}
                    />
                    { build_quick_actions(page, link) }
                </aside>
            </div>
            { build_drag_overlay(page) }
            <TopSheet node_ref={page.settings_ref.clone()}>
                <FieldSettings
                    field={page.editing.and_then(|id| page.fields.get(id).cloned())}
                    on_save={link.callback(Msg::UpdateField)}
                    on_close={link.callback(|_: ()| Msg::CloseSettings)}
                />
            </TopSheet>
        </div>
    }
}

fn build_toolbar(page: &DesignerPage, ctx: &Context<DesignerPage>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let navigate = props.app.navigate.clone();
    let data_route = Route::DataUpload {
        template_id: props.template_id.clone(),
    };
    let name = page
        .template
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();

    html! {
        <div class="page-header designer-toolbar">
            <button class="btn btn-ghost" onclick={navigate.reform(|_: MouseEvent| Route::Dashboard)}>
                <span class="material-icons">{"arrow_back"}</span>
                {"Back"}
            </button>
            <h1>{ name }</h1>
            <div class="toolbar-actions">
                <button class="btn btn-outline" onclick={navigate.reform(move |_: MouseEvent| data_route.clone())}>
                    <span class="material-icons">{"upload_file"}</span>
                    {"Upload / Replace Data"}
                </button>
                <button
                    class="btn btn-outline"
                    disabled={page.suggesting}
                    onclick={link.callback(|_| Msg::SuggestPlacement)}
                >
                    <span class="material-icons">{"auto_awesome"}</span>
                    { if page.suggesting { "Thinking..." } else { "AI Suggestions" } }
                </button>
                <button
                    class="btn btn-outline"
                    disabled={page.saving}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    <span class="material-icons">{"save"}</span>
                    { if page.saving { "Saving..." } else { "Save" } }
                </button>
                <button
                    class="btn btn-primary"
                    disabled={page.generating || page.fields.is_empty()}
                    onclick={link.callback(|_| Msg::Generate)}
                >
                    <span class="material-icons">{"print"}</span>
                    { if page.generating { "Generating..." } else { "Generate Cards" } }
                </button>
            </div>
        </div>
    }
}

fn build_available_fields(page: &DesignerPage, ctx: &Context<DesignerPage>) -> Html {
    let props = ctx.props();
    let columns = page.columns();
    let upload_route = Route::DataUpload {
        template_id: props.template_id.clone(),
    };
    let to_upload = props.app.navigate.reform(move |_: MouseEvent| upload_route.clone());

    let body = if columns.is_empty() {
        html! {
            <div class="empty-state small">
                <span class="material-icons">{"table_chart"}</span>
                <p>{"No data uploaded yet"}</p>
                <button class="btn btn-primary" onclick={to_upload}>{"Upload Data"}</button>
            </div>
        }
    } else {
        html! {
            <>
                <div class="chip-column">
                    { for columns.iter().map(|column| build_chip(page, ctx.link(), column)) }
                </div>
                <button class="btn btn-link" onclick={to_upload}>{"Change Data"}</button>
            </>
        }
    };

    html! {
        <div class="card">
            <h3 class="card-title">{"Available Fields"}</h3>
            <p class="hint">{"Drag fields onto the template"}</p>
            { body }
        </div>
    }
}

fn build_chip(page: &DesignerPage, link: &Scope<DesignerPage>, column: &str) -> Html {
    let dragged = matches!(
        page.drag.payload(),
        Some(DragPayload::Available(name)) if name == column
    ) && page.drag.is_active();
    let payload = column.to_string();
    let onpointerdown = link.batch_callback(move |e: PointerEvent| {
        if e.button() != 0 {
            return None;
        }
        e.prevent_default();
        Some(Msg::DragStart(
            DragPayload::Available(payload.clone()),
            Point::new(e.client_x() as f64, e.client_y() as f64),
        ))
    });

    html! {
        <div class={classes!("field-chip", dragged.then_some("dragging"))} title={column.to_string()} {onpointerdown}>
            <span class="material-icons">{"drag_indicator"}</span>
            { pretty_label(column) }
        </div>
    }
}

fn build_mapping_list(page: &DesignerPage, link: &Scope<DesignerPage>) -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{ format!("Field Mappings ({})", page.fields.len()) }</h3>
            if page.fields.is_empty() {
                <p class="hint">{"No fields placed yet."}</p>
            } else {
                <ul class="mapping-list">
                    { for page.fields.iter().map(|record| {
                        let id = record.id;
                        let field = &record.mapping;
                        html! {
                            <li key={id.to_string()} class="mapping-row">
                                <span class="mapping-name">{ field.field_name.clone() }</span>
                                <span class="meta">{ format!("({}, {})", field.x.round(), field.y.round()) }</span>
                                <button class="icon-btn" title="Field settings"
                                    onclick={link.callback(move |_| Msg::EditField(id))}>
                                    <span class="material-icons">{"settings"}</span>
                                </button>
                                <button class="icon-btn danger" title="Remove field"
                                    onclick={link.callback(move |_| Msg::RemoveField(id))}>
                                    {"×"}
                                </button>
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}

fn build_quick_actions(page: &DesignerPage, link: &Scope<DesignerPage>) -> Html {
    html! {
        <div class="card">
            <h3 class="card-title">{"Quick Actions"}</h3>
            <button
                class="btn btn-outline btn-block"
                disabled={page.fields.is_empty()}
                onclick={link.callback(|_| Msg::ClearFields)}
            >
                <span class="material-icons">{"clear_all"}</span>
                {"Clear All Fields"}
            </button>
        </div>
    }
}

fn build_drag_overlay(page: &DesignerPage) -> Html {
    if !page.drag.is_active() {
        return html! {};
    }
    let (Some(pointer), Some(label)) = (page.drag.pointer(), page.dragged_label()) else {
        return html! {};
    };
    html! {
        <div
            class="drag-overlay field-chip"
            style={format!("left:{}px;top:{}px;", pointer.x + 12.0, pointer.y + 12.0)}
        >
            <span class="material-icons">{"drag_indicator"}</span>
            { label }
        </div>
    }
}
