use crate::app::App;

mod api;
mod app;
mod components;
mod config;
mod context;
mod helpers;
mod pages;
mod router;
mod session;
mod store;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
