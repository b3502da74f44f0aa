//! Route table mapping URL paths to pages.
//!
//! ARCHITECTURE
//! ============
//! `App` declares one `leptos_router` route per table entry and lets the
//! router do path matching. Each declared route then asks this table what
//! the path leads to, so the redirect target of `/` and the auth guard on
//! `/tasks` live here as plain, validated data. Unmatched paths fall through
//! to the router's "Page not found." fallback.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::HashSet;

use leptos_router::NavigateOptions;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const TASKS_PATH: &str = "/tasks";

/// Router segments for the paths above (`StaticSegment` takes them without
/// the leading slash).
pub const ROOT_SEGMENT: &str = "";
pub const LOGIN_SEGMENT: &str = "login";
pub const SIGNUP_SEGMENT: &str = "signup";
pub const TASKS_SEGMENT: &str = "tasks";

/// Pages the router can mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Signup,
    Tasks,
}

/// What a matched path leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub target: RouteTarget,
    /// Visitors without a token are sent to the login page instead.
    pub requires_auth: bool,
}

impl RouteEntry {
    pub fn page(path: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Page(page),
            requires_auth: false,
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
            requires_auth: false,
        }
    }

    #[must_use]
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// Outcome of resolving a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Page),
    Redirect(String),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),
}

/// Navigation options for every redirect the router issues.
///
/// Redirects replace the current history entry, so Back from `/login` does
/// not land on `/` (or a guarded page) and bounce forward again.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..NavigateOptions::default()
    }
}

/// Entries of the application's table: `/` redirects to `/login`, and
/// `/tasks` requires a signed-in user.
pub fn standard_entries() -> Vec<RouteEntry> {
    vec![
        RouteEntry::redirect(ROOT_PATH, LOGIN_PATH),
        RouteEntry::page(LOGIN_PATH, Page::Login),
        RouteEntry::page(SIGNUP_PATH, Page::Signup),
        RouteEntry::page(TASKS_PATH, Page::Tasks).protected(),
    ]
}

/// Immutable, ordered set of route entries with unique paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and freeze `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DuplicatePath`] if two entries share a path and
    /// [`RouteError::InvalidPath`] if a path is not absolute.
    pub fn configure(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, RouteError> {
        let entries: Vec<RouteEntry> = entries
            .into_iter()
            .map(|mut entry| {
                entry.path = normalize_path(&entry.path).to_owned();
                entry
            })
            .collect();

        let mut seen = HashSet::new();
        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(RouteError::InvalidPath(entry.path.clone()));
            }
            if !seen.insert(entry.path.as_str()) {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The application's table, validated through [`Self::configure`].
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] if [`standard_entries`] is malformed.
    pub fn standard() -> Result<Self, RouteError> {
        Self::configure(standard_entries())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Resolve a path for a visitor with the given auth status.
    pub fn resolve(&self, path: &str, is_authenticated: bool) -> Resolution {
        let path = normalize_path(path);
        let Some(entry) = self.entries.iter().find(|e| e.path == path) else {
            return Resolution::NotFound;
        };
        if entry.requires_auth && !is_authenticated {
            log::debug!("router: {path} requires auth, redirecting to {LOGIN_PATH}");
            return Resolution::Redirect(LOGIN_PATH.to_owned());
        }
        match &entry.target {
            RouteTarget::Page(page) => Resolution::Render(*page),
            RouteTarget::Redirect(to) => Resolution::Redirect(to.clone()),
        }
    }
}

/// Drop a trailing slash (except on the root) and map an empty path to `/`.
fn normalize_path(path: &str) -> &str {
    if path.is_empty() {
        return ROOT_PATH;
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}
