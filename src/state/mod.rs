//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is built explicitly in `App` and provided through Leptos context,
//! so tests construct their own instances over in-memory storage.

pub mod auth;
