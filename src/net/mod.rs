//! Networking modules for talking to the task backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes one method per backend endpoint, `transport` moves the bytes
//! (`gloo-net` in the browser, `reqwest` natively), and `types` defines the
//! wire schema and error type.

pub mod api;
pub mod transport;
pub mod types;
