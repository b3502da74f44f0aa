//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is built once in `App`, handed to components through Leptos
//! context, and read by the router to guard protected pages. Every mutation
//! is mirrored into persistent storage so a reload restores the session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::TOKEN_STORAGE_KEY;
use crate::util::storage::{KeyValueStorage, StorageError};

/// Snapshot of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Authentication state plus the storage medium it is mirrored into.
#[derive(Clone, Debug)]
pub struct AuthStore<S> {
    storage: S,
    state: AuthState,
}

impl<S: KeyValueStorage> AuthStore<S> {
    /// Rehydrate from `storage`. An absent or empty stored token leaves the
    /// store signed out.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the stored token cannot be read.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let token = storage
            .get(TOKEN_STORAGE_KEY)?
            .filter(|token| !token.is_empty());
        if token.is_some() {
            log::info!("auth: restored session from storage");
        }
        Ok(Self {
            storage,
            state: AuthState { token },
        })
    }

    /// A signed-out store that has not read `storage`.
    pub fn signed_out(storage: S) -> Self {
        Self {
            storage,
            state: AuthState::default(),
        }
    }

    /// Record a freshly issued token. The token is not validated.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the token cannot be persisted; the
    /// in-memory state is left unchanged in that case.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), StorageError> {
        let token = token.into();
        self.storage.set(TOKEN_STORAGE_KEY, &token)?;
        self.state.token = Some(token);
        log::info!("auth: token stored");
        Ok(())
    }

    /// Drop the token from memory and storage.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the stored token cannot be removed; the
    /// in-memory state is left unchanged in that case.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_STORAGE_KEY)?;
        self.state.token = None;
        log::info!("auth: signed out");
        Ok(())
    }
}

impl<S> AuthStore<S> {
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }
}

/// The store as used by the running app, backed by `localStorage`.
pub type SessionStore = AuthStore<crate::util::storage::BrowserStorage>;
