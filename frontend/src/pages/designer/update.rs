use common::drag::{DragEnd, FieldMutation};
use common::error::PreflightError;
use common::fields::FieldSet;
use common::route::Route;
use log::{debug, info, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::DesignerPage;
use crate::api::{generation, templates};
use crate::components::canvas::DropEvent;
use crate::components::toast::{show_error, show_toast};
use crate::components::top_sheet::{close_top_sheet, open_top_sheet};
use crate::helpers::file_from_stored;

pub fn update(page: &mut DesignerPage, ctx: &Context<DesignerPage>, msg: Msg) -> bool {
    let props = ctx.props();
    let app = &props.app;
    match msg {
        Msg::TemplateLoaded(Ok(template)) => {
            info!(
                "designing {} with {} saved fields",
                template.id,
                template.field_mappings.len()
            );
            page.fields = FieldSet::from_mappings(template.field_mappings.clone());
            page.template = Some(template);
            page.mark_saved();
            true
        }
        Msg::TemplateLoaded(Err(err)) => {
            warn!("loading template {} failed: {err}", props.template_id);
            show_error(&err.message_or("Failed to load template"));
            app.go(Route::Dashboard);
            false
        }
        Msg::DataChanged => {
            page.uploaded = app.uploads.current();
            debug!("available fields now {:?}", page.columns());
            true
        }

        Msg::DragStart(payload, origin) => {
            if !page.drag.begin(payload, origin) {
                return false;
            }
            debug!("drag started: {:?}", page.drag.payload());
            page.attach_drag_listeners(ctx.link());
            false
        }
        Msg::DragMove(pointer) => {
            let was_active = page.drag.is_active();
            page.drag.track(pointer);
            was_active || page.drag.is_active()
        }
        Msg::DragRelease => {
            page.drag_listeners.clear();
            match page.drag.release() {
                Some(DragEnd::Dropped(drop)) => {
                    page.drop_seq += 1;
                    debug!("drop #{} at {:?}", page.drop_seq, drop.point);
                    page.drop = Some(DropEvent { seq: page.drop_seq, drop });
                }
                Some(DragEnd::Cancelled) => debug!("drag released without moving"),
                None => {}
            }
            true
        }
        Msg::DragCancel => {
            page.drag_listeners.clear();
            if page.drag.cancel().is_some() {
                debug!("drag cancelled");
            }
            true
        }
        Msg::Mutate(mutation) => {
            match mutation {
                FieldMutation::Move { id, position } => {
                    page.fields.move_to(id, position);
                }
                FieldMutation::Add(mapping) => {
                    page.fields.add(mapping);
                }
            }
            page.sync_dirty_flag();
            true
        }

        Msg::EditField(id) => {
            if page.fields.get(id).is_none() {
                return false;
            }
            page.editing = Some(id);
            open_top_sheet(page.settings_ref.clone());
            true
        }
        Msg::UpdateField(mapping) => {
            if let Some(id) = page.editing.take() {
                page.fields.update(id, mapping);
                page.sync_dirty_flag();
            }
            close_top_sheet(page.settings_ref.clone());
            true
        }
        Msg::CloseSettings => {
            page.editing = None;
            close_top_sheet(page.settings_ref.clone());
            true
        }
        Msg::RemoveField(id) => {
            page.fields.remove(id);
            if page.editing == Some(id) {
                page.editing = None;
                close_top_sheet(page.settings_ref.clone());
            }
            page.sync_dirty_flag();
            true
        }
        Msg::ClearFields => {
            page.fields.clear();
            page.sync_dirty_flag();
            true
        }

        Msg::Save => {
            if page.saving || page.template.is_none() {
                return false;
            }
            page.saving = true;
            let api = app.api.clone();
            let id = props.template_id.clone();
            let mappings = page.fields.to_mappings();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = templates::update(&api, &id, mappings).await;
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(result) => {
            page.saving = false;
            match result {
                Ok(()) => {
                    page.mark_saved();
                    show_toast("Template saved successfully!");
                }
                Err(err) => {
                    warn!("saving template failed: {err}");
                    show_error(&err.message_or("Failed to save template"));
                }
            }
            true
        }

        Msg::SuggestPlacement => {
            if page.suggesting {
                return false;
            }
            let columns = page.columns().to_vec();
            if columns.is_empty() {
                show_error("Please upload data first to get AI suggestions");
                return false;
            }
            page.suggesting = true;
            let api = app.api.clone();
            let id = props.template_id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = templates::field_placement(&api, &id, columns).await;
                link.send_message(Msg::PlacementSuggested(result));
            });
            true
        }
        Msg::PlacementSuggested(result) => {
            page.suggesting = false;
            match result {
                Ok(mappings) => {
                    info!("applying {} suggested fields", mappings.len());
                    page.editing = None;
                    page.fields.replace_all(mappings);
                    page.sync_dirty_flag();
                    show_toast("AI field placement suggestions applied!");
                }
                Err(err) => {
                    warn!("field placement failed: {err}");
                    show_error(&err.message_or("Failed to get AI suggestions"));
                }
            }
            true
        }

        Msg::Generate => {
            if page.generating {
                return false;
            }
            let data = match page.generation_data(app.uploads.current()) {
                Ok(data) => data,
                Err(err) => {
                    debug!("generation blocked: {err:?}");
                    show_error(&err.to_string());
                    if err == PreflightError::MissingData {
                        app.go(Route::DataUpload {
                            template_id: props.template_id.clone(),
                        });
                    }
                    return true;
                }
            };
            let file = match file_from_stored(&data.file) {
                Ok(file) => file,
                Err(err) => {
                    warn!("stored data file unusable: {err}");
                    show_error("Failed to read the uploaded data file. Please upload it again.");
                    return false;
                }
            };
            page.generating = true;
            let api = app.api.clone();
            let id = props.template_id.clone();
            let mappings = page.fields.to_mappings();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = generation::generate(&api, &id, &mappings, &file).await;
                link.send_message(Msg::GenerationStarted(result));
            });
            true
        }
        Msg::GenerationStarted(result) => {
            page.generating = false;
            match result {
                Ok(()) => {
                    show_toast("Card generation started! Check your dashboard for progress.");
                    app.go(Route::Dashboard);
                    false
                }
                Err(err) => {
                    warn!("generation request failed: {err}");
                    show_error(&err.message_or("Failed to start generation"));
                    true
                }
            }
        }
    }
}
