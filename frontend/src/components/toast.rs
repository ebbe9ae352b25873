//! Transient notifications injected straight into the document body.
//!
//! Toasts are plain DOM nodes rather than components so that async tasks can
//! report results after the page that started them has gone away.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const TOAST_MS: u32 = 3000;

#[derive(Clone, Copy)]
enum Kind {
    Success,
    Error,
}

pub fn show_toast(message: &str) {
    show(message, Kind::Success);
}

pub fn show_error(message: &str) {
    show(message, Kind::Error);
}

fn show(message: &str, kind: Kind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    toast.set_class_name(match kind {
        Kind::Success => "toast toast-success",
        Kind::Error => "toast toast-error",
    });
    // Stack above toasts that are still visible.
    let visible = document
        .get_elements_by_class_name("toast")
        .length();
    let _ = toast
        .style()
        .set_property("bottom", &format!("{}px", 20 + visible * 56));

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}
