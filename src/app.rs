//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::pages::{login::LoginPage, signup::SignupPage, tasks::TasksPage};
use crate::routes::{
    LOGIN_SEGMENT, Page, ROOT_SEGMENT, Resolution, RouteTable, SIGNUP_SEGMENT, TASKS_SEGMENT,
    redirect_options,
};
use crate::state::auth::{AuthStore, SessionStore};
use crate::util::storage::BrowserStorage;

const NOT_FOUND: &str = "Page not found.";

/// Segments declared in `<Routes>` below, in declaration order.
const DECLARED_SEGMENTS: [&str; 4] = [
    ROOT_SEGMENT,
    LOGIN_SEGMENT,
    SIGNUP_SEGMENT,
    TASKS_SEGMENT,
];

/// Absolute path for a router segment.
fn segment_path(segment: &str) -> String {
    format!("/{segment}")
}

fn declared_paths() -> Vec<String> {
    DECLARED_SEGMENTS.into_iter().map(segment_path).collect()
}

/// Build the route table, starting with an empty one (every page "not
/// found") if it fails validation.
fn route_table() -> RouteTable {
    let table = match RouteTable::standard() {
        Ok(table) => table,
        Err(e) => {
            log::error!("router: invalid route table: {e}");
            return RouteTable::default();
        }
    };
    let table_paths: Vec<&str> = table.entries().iter().map(|e| e.path.as_str()).collect();
    if table_paths != declared_paths() {
        log::error!("router: table paths {table_paths:?} differ from routes");
    }
    table
}

/// Open the session store over `localStorage`, starting signed out if the
/// medium cannot be read.
fn open_session() -> SessionStore {
    match AuthStore::open(BrowserStorage) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("auth: storage unreadable, starting signed out: {e}");
            AuthStore::signed_out(BrowserStorage)
        }
    }
}

/// Root application component.
///
/// Provides config, the auth store, and the route table as context, then
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(open_session());
    provide_context(auth);
    provide_context(ClientConfig::default());
    provide_context(route_table());

    view! {
        <Title text="Tasks"/>

        <Router>
            <Routes fallback=|| NOT_FOUND.into_view()>
                <Route
                    path=StaticSegment(ROOT_SEGMENT)
                    view=|| view! { <Resolved segment=ROOT_SEGMENT/> }
                />
                <Route
                    path=StaticSegment(LOGIN_SEGMENT)
                    view=|| view! { <Resolved segment=LOGIN_SEGMENT/> }
                />
                <Route
                    path=StaticSegment(SIGNUP_SEGMENT)
                    view=|| view! { <Resolved segment=SIGNUP_SEGMENT/> }
                />
                <Route
                    path=StaticSegment(TASKS_SEGMENT)
                    view=|| view! { <Resolved segment=TASKS_SEGMENT/> }
                />
            </Routes>
        </Router>
    }
}

/// Looks up a matched route in the table and renders its page or redirect.
///
/// Re-resolves when the signed-in flag changes, so signing out on a
/// protected page redirects immediately.
#[component]
fn Resolved(segment: &'static str) -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let table = expect_context::<RouteTable>();
    let path = segment_path(segment);

    let signed_in = Memo::new(move |_| auth.with(AuthStore::is_authenticated));
    let resolution = Memo::new(move |_| table.resolve(&path, signed_in.get()));

    move || match resolution.get() {
        Resolution::Render(page) => render_page(page),
        Resolution::Redirect(to) => {
            view! { <Redirect path=to options=redirect_options()/> }.into_any()
        }
        Resolution::NotFound => NOT_FOUND.into_any(),
    }
}

fn render_page(page: Page) -> AnyView {
    match page {
        Page::Login => view! { <LoginPage/> }.into_any(),
        Page::Signup => view! { <SignupPage/> }.into_any(),
        Page::Tasks => view! { <TasksPage/> }.into_any(),
    }
}
