//! # client
//!
//! Leptos + WASM frontend for the whitelist dApp.
//!
//! This crate contains the page, its components, the session reducer, and the
//! view-controller that talks to the injected wallet through the `contract`
//! crate's bindings.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
