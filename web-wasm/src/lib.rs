//! Bid Writer Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod download;
mod pages;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("bid writer web starting (api: {})", config::api_base_url());
    leptos::mount::mount_to_body(app::App);
}
