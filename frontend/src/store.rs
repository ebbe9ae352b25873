//! The uploaded-data channel between the data upload page and the designer.
//!
//! The record lives in session storage under `uploadedDataFile` and is
//! re-read on every access. Same-tab writers go through
//! [`UploadedDataStore::publish`], which notifies subscribers; writes from
//! other browsing contexts arrive as `storage` events.

use common::model::data::UploadedDataFile;
use common::observe::{Subscribers, Subscription};
use gloo_events::EventListener;
use gloo_storage::errors::StorageError;
use gloo_storage::{SessionStorage, Storage};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;
use yew::Callback;

use crate::api::ApiError;

pub const UPLOADED_DATA_KEY: &str = "uploadedDataFile";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadedDataStore {
    subscribers: Subscribers<()>,
}

/// Keeps a subscriber registered until dropped.
pub struct StoreSubscription {
    _local: Subscription,
    _storage: Option<EventListener>,
}

impl UploadedDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record; missing or unreadable data reads as `None`.
    pub fn current(&self) -> Option<UploadedDataFile> {
        match SessionStorage::get::<UploadedDataFile>(UPLOADED_DATA_KEY) {
            Ok(data) => Some(data),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                warn!("ignoring stored data file: {err}");
                None
            }
        }
    }

    /// Overwrites the record and tells every subscriber in this tab.
    pub fn publish(&self, data: &UploadedDataFile) -> Result<(), ApiError> {
        SessionStorage::set(UPLOADED_DATA_KEY, data)
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        self.subscribers.notify(&());
        Ok(())
    }

    pub fn subscribe(&self, on_change: Callback<()>) -> StoreSubscription {
        let local = {
            let on_change = on_change.clone();
            self.subscribers.subscribe(move |_| on_change.emit(()))
        };
        let storage = web_sys::window().map(|window| {
            EventListener::new(&window, "storage", move |event| {
                let key = event
                    .dyn_ref::<StorageEvent>()
                    .and_then(|event| event.key());
                if key.as_deref() == Some(UPLOADED_DATA_KEY) {
                    on_change.emit(());
                }
            })
        });
        StoreSubscription {
            _local: local,
            _storage: storage,
        }
    }
}
