//! Browser utilities shared by the pages.
//!
//! - Dirty tracking: MD5 digests of the serialized field mappings are compared
//!   and the result is mirrored on `window.app_dirty`, which the designer's
//!   `beforeunload` guard reads.
//! - File plumbing between `web_sys::File`, raw bytes and the data URLs kept
//!   in session storage.
//! - Downloads of generated documents through a temporary object URL.

use common::model::data::StoredFile;
use common::upload::{decode_data_url, encode_data_url};
use gloo_file::futures::read_as_bytes;
use js_sys::{Array, Reflect, Uint8Array};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BlobPropertyBag, File, FilePropertyBag, HtmlAnchorElement, Url};

use crate::api::{browser_error, ApiError};

const DIRTY_FLAG: &str = "app_dirty";

/// Computes the MD5 hash of a string and returns it as a hex digest.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str(DIRTY_FLAG),
            &JsValue::from_bool(dirty),
        );
    }
}

pub fn window_is_dirty() -> bool {
    web_sys::window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str(DIRTY_FLAG)).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, ApiError> {
    let file = gloo_file::File::from(file.clone());
    read_as_bytes(&file)
        .await
        .map_err(|e| ApiError::Browser(e.to_string()))
}

/// Reads a selected file into the record kept in session storage.
pub async fn store_file(file: &File) -> Result<StoredFile, ApiError> {
    let bytes = read_file_bytes(file).await?;
    Ok(StoredFile {
        name: file.name(),
        mime_type: file.type_(),
        data_url: encode_data_url(&file.type_(), &bytes),
    })
}

/// Rebuilds an uploadable `File` from its stored data URL.
pub fn file_from_stored(stored: &StoredFile) -> Result<File, ApiError> {
    let (url_type, bytes) =
        decode_data_url(&stored.data_url).map_err(|e| ApiError::Storage(e.to_string()))?;
    let mime_type = [stored.mime_type.as_str(), url_type.as_str()]
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or("text/csv");

    let parts = Array::of1(&Uint8Array::from(bytes.as_slice()));
    let options = FilePropertyBag::new();
    options.set_type(mime_type);
    File::new_with_u8_array_sequence_and_options(&parts, &stored.name, &options)
        .map_err(browser_error)
}

/// Saves `bytes` under `file_name` through a temporary anchor.
pub fn trigger_download(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), ApiError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Browser("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ApiError::Browser("no document body".into()))?;

    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(browser_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(browser_error)?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(browser_error)?;
    anchor.click();
    let _ = body.remove_child(&anchor);
    Url::revoke_object_url(&url).map_err(browser_error)
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Local calendar year and 1-based month.
pub fn current_year_month() -> (i32, u32) {
    let now = js_sys::Date::new_0();
    (now.get_full_year() as i32, now.get_month() + 1)
}

pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Numbers the inputs a page sends requests about, so answers that arrive
/// after the input changed can be told apart and dropped.
#[derive(Debug, Default)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Moves to a new input; answers tagged with older tickets go stale.
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_for_replaced_input_is_stale() {
        let mut selection = RequestTicket::default();
        let first = selection.advance();
        let validating_first = selection.current();

        let second = selection.advance();

        assert_eq!(validating_first, first);
        assert!(!selection.is_current(validating_first));
        assert!(selection.is_current(second));
    }

    #[test]
    fn clearing_invalidates_pending_answers() {
        let mut selection = RequestTicket::default();
        let pending = selection.advance();
        selection.advance();
        assert!(!selection.is_current(pending));
    }

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn md5_is_hex() {
        assert_eq!(compute_md5(""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
