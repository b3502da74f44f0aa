//! # tasks-client
//!
//! Leptos + WASM single-page client for the task backend.
//!
//! Three routes (`/login`, `/signup`, `/tasks`, with `/` redirecting to
//! `/login`), a REST client for the backend, and an auth store that mirrors
//! the bearer token into `localStorage`. Build for the browser with the `csr`
//! feature (see `index.html`); without it the crate builds natively for tests.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Install browser logging and mount `App` on `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        log::warn!("console logger already installed: {e}");
    }
    log::info!("tasks-client starting");
    leptos::mount::mount_to_body(app::App);
}
