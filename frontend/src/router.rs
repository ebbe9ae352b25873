//! Browser history glue for [`common::route::Route`].

use common::route::Route;
use gloo_events::EventListener;
use log::warn;
use wasm_bindgen::JsValue;
use yew::Callback;

/// The route of the current location, `None` for unknown paths.
pub fn current_route() -> Option<Route> {
    let location = web_sys::window()?.location();
    let path = location.pathname().ok()?;
    let query = location.search().unwrap_or_default();
    Route::parse(&path, &query)
}

pub fn push(route: &Route) {
    change(route, false);
}

/// Swaps the current history entry, used for guard redirects.
pub fn replace(route: &Route) {
    change(route, true);
}

fn change(route: &Route, replace: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = route.to_path();
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&path))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(&path))
    };
    if let Err(err) = result {
        warn!("history update to {path} failed: {err:?}");
    }
}

/// Calls `on_change` on back/forward navigation.
pub fn listen(on_change: Callback<()>) -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(EventListener::new(&window, "popstate", move |_| {
        on_change.emit(())
    }))
}
