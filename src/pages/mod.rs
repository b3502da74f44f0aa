//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and calls into `net::api` and the auth
//! store. Input validation and response interpretation are plain functions
//! so they can be tested without a browser.

pub mod login;
pub mod signup;
pub mod tasks;
