//! Designer state and the window listeners it holds.

use common::drag::{DragPayload, DragState};
use common::error::PreflightError;
use common::fields::{FieldId, FieldSet};
use common::geometry::Point;
use common::matching::preflight;
use common::model::data::UploadedDataFile;
use common::model::template::Template;
use gloo_events::{EventListener, EventListenerOptions};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{BeforeUnloadEvent, KeyboardEvent, PointerEvent};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use crate::components::canvas::DropEvent;
use crate::helpers::{compute_md5, set_window_dirty_flag, window_is_dirty};
use crate::store::StoreSubscription;

pub struct DesignerPage {
    /// `None` until the first load answers.
    pub template: Option<Template>,
    pub fields: FieldSet,
    /// MD5 of the mappings as last loaded or saved.
    pub saved_md5: Option<String>,
    pub uploaded: Option<UploadedDataFile>,

    pub drag: DragState,
    pub drop: Option<DropEvent>,
    pub drop_seq: u64,
    /// Window pointer and key listeners, alive only during a drag.
    pub drag_listeners: Vec<EventListener>,

    pub editing: Option<FieldId>,
    pub settings_ref: NodeRef,

    pub saving: bool,
    pub suggesting: bool,
    pub generating: bool,

    pub store_subscription: Option<StoreSubscription>,
    pub unload_guard: Option<EventListener>,
}

impl DesignerPage {
    pub fn new(uploaded: Option<UploadedDataFile>) -> Self {
        Self {
            template: None,
            fields: FieldSet::new(),
            saved_md5: None,
            uploaded,
            drag: DragState::default(),
            drop: None,
            drop_seq: 0,
            drag_listeners: Vec::new(),
            editing: None,
            settings_ref: NodeRef::default(),
            saving: false,
            suggesting: false,
            generating: false,
            store_subscription: None,
            unload_guard: None,
        }
    }

    pub fn columns(&self) -> &[String] {
        self.uploaded.as_ref().map(|u| u.columns()).unwrap_or_default()
    }

    pub fn mappings_md5(&self) -> String {
        let json = serde_json::to_string(&self.fields.to_mappings()).unwrap_or_default();
        compute_md5(&json)
    }

    pub fn is_dirty(&self) -> bool {
        self.saved_md5.as_deref() != Some(self.mappings_md5().as_str())
    }

    /// Mirrors the dirty state on the window for the unload guard.
    pub fn sync_dirty_flag(&self) {
        set_window_dirty_flag(self.template.is_some() && self.is_dirty());
    }

    pub fn mark_saved(&mut self) {
        self.saved_md5 = Some(self.mappings_md5());
        self.sync_dirty_flag();
    }

    /// Adopts `current`, the record as stored right now, and checks that cards
    /// can be generated from it.
    pub fn generation_data(
        &mut self,
        current: Option<UploadedDataFile>,
    ) -> Result<UploadedDataFile, PreflightError> {
        self.uploaded = current;
        preflight(&self.fields, self.uploaded.as_ref()).cloned()
    }

    /// Name shown on the chip that follows the pointer.
    pub fn dragged_label(&self) -> Option<String> {
        match self.drag.payload()? {
            DragPayload::Existing(id) => self.fields.get(*id).map(|f| f.field_name.clone()),
            DragPayload::Available(column) => Some(common::matching::pretty_label(column)),
        }
    }

    pub fn attach_drag_listeners(&mut self, link: &Scope<Self>) {
        let Some(window) = web_sys::window() else {
            warn!("no window to follow the drag on");
            return;
        };
        let on_move = link.callback(Msg::DragMove);
        let on_release = link.callback(|_: ()| Msg::DragRelease);
        let on_cancel = link.callback(|_: ()| Msg::DragCancel);
        let on_escape = on_cancel.clone();

        self.drag_listeners = vec![
            EventListener::new(&window, "pointermove", move |event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    on_move.emit(Point::new(event.client_x() as f64, event.client_y() as f64));
                }
            }),
            EventListener::new(&window, "pointerup", move |_| on_release.emit(())),
            EventListener::new(&window, "pointercancel", move |_| on_cancel.emit(())),
            EventListener::new(&window, "keydown", move |event| {
                let escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|key| key.key() == "Escape");
                if escape {
                    on_escape.emit(());
                }
            }),
        ];
    }
}

/// Asks the browser to confirm leaving while `window.app_dirty` is set.
pub fn unload_guard() -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(EventListener::new_with_options(
        &window,
        "beforeunload",
        EventListenerOptions::enable_prevent_default(),
        |event| {
            if !window_is_dirty() {
                return;
            }
            event.prevent_default();
            if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                event.set_return_value("You have unsaved changes.");
            }
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::data::{DataPreview, StoredFile};
    use common::model::template::FieldMapping;
    use pretty_assertions::assert_eq;

    fn record(name: &str, columns: &[&str]) -> UploadedDataFile {
        UploadedDataFile {
            file: StoredFile {
                name: name.to_string(),
                mime_type: "text/csv".to_string(),
                data_url: "data:text/csv;base64,".to_string(),
            },
            preview: DataPreview {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    fn page_with(cached: Option<UploadedDataFile>, fields: &[&str]) -> DesignerPage {
        let mut page = DesignerPage::new(cached);
        page.fields
            .extend(fields.iter().map(|name| FieldMapping::new_at(*name, 0.0, 0.0)));
        page
    }

    #[test]
    fn generation_uses_the_record_stored_at_click_time() {
        let mut page = page_with(Some(record("old.csv", &["name"])), &["name"]);

        let data = page
            .generation_data(Some(record("new.csv", &["Name", "Dept"])))
            .unwrap();

        assert_eq!(data.file.name, "new.csv");
        assert_eq!(page.columns(), ["Name", "Dept"]);
    }

    #[test]
    fn cleared_record_blocks_generation_despite_cached_copy() {
        let mut page = page_with(Some(record("old.csv", &["name"])), &["name"]);

        assert_eq!(page.generation_data(None), Err(PreflightError::MissingData));
        assert!(page.uploaded.is_none());
    }

    #[test]
    fn replaced_record_is_checked_against_mappings() {
        let mut page = page_with(Some(record("old.csv", &["name", "photo"])), &["name", "photo"]);

        let err = page
            .generation_data(Some(record("new.csv", &["name"])))
            .unwrap_err();

        assert_eq!(err, PreflightError::UnmatchedFields(vec!["photo".to_string()]));
    }
}
