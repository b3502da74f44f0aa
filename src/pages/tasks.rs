//! Task list page for the signed-in user.
//!
//! The router only mounts this page for authenticated visitors. A 401 from
//! the backend signs the user out, which makes the router send them back to
//! the login page.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
#[cfg(feature = "csr")]
use crate::net::transport::GlooTransport;
use crate::net::types::Task;
#[cfg(any(test, feature = "csr"))]
use crate::net::types::{ApiError, NewTask};
use crate::state::auth::SessionStore;

fn validate_task_description(input: &str) -> Result<String, &'static str> {
    let description = input.trim();
    if description.is_empty() {
        return Err("Describe the task first.");
    }
    Ok(description.to_owned())
}

/// Update body that flips completion and keeps the description.
#[cfg(any(test, feature = "csr"))]
fn toggled(task: &Task) -> NewTask {
    let mut update = NewTask::from(task);
    update.completed = !task.completed;
    update
}

fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

#[cfg(any(test, feature = "csr"))]
fn replace_task(tasks: &mut [Task], updated: Task) {
    if let Some(slot) = tasks.iter_mut().find(|t| t.id == updated.id) {
        *slot = updated;
    }
}

#[cfg(any(test, feature = "csr"))]
fn remove_task(tasks: &mut Vec<Task>, task_id: i64) {
    tasks.retain(|t| t.id != task_id);
}

fn item_class(completed: bool) -> &'static str {
    if completed {
        "tasks-page__item tasks-page__item--done"
    } else {
        "tasks-page__item"
    }
}

#[cfg(any(test, feature = "csr"))]
fn is_unauthorized(err: &ApiError) -> bool {
    matches!(err, ApiError::Status { status: 401, .. })
}

/// Drop the session; the router then redirects to the login page.
fn sign_out(auth: RwSignal<SessionStore>, info: RwSignal<String>) {
    if let Some(Err(e)) = auth.try_update(SessionStore::logout) {
        log::warn!("tasks: sign out could not clear storage: {e}");
        info.set(format!("Could not sign out: {e}"));
    }
}

/// Signals and config shared by the page's actions.
#[derive(Clone)]
struct TaskBoard {
    config: ClientConfig,
    auth: RwSignal<SessionStore>,
    tasks: RwSignal<Vec<Task>>,
    info: RwSignal<String>,
    loading: RwSignal<bool>,
}

#[cfg(feature = "csr")]
impl TaskBoard {
    fn client(&self) -> ApiClient<GlooTransport> {
        ApiClient::new(self.config.clone(), GlooTransport)
    }

    fn token(&self) -> Option<String> {
        self.auth
            .with_untracked(|store| store.token().map(str::to_owned))
    }

    fn report(&self, err: ApiError) {
        if is_unauthorized(&err) {
            log::info!("tasks: session rejected by backend");
            sign_out(self.auth, self.info);
        } else {
            self.info.set(err.to_string());
        }
    }

    fn load(&self) {
        let Some(token) = self.token() else {
            self.loading.set(false);
            return;
        };
        let board = self.clone();
        board.loading.set(true);
        leptos::task::spawn_local(async move {
            match board.client().list_tasks(&token).await {
                Ok(list) => board.tasks.set(list),
                Err(e) => board.report(e),
            }
            board.loading.set(false);
        });
    }

    fn add(&self, description: String) {
        let Some(token) = self.token() else {
            return;
        };
        let board = self.clone();
        leptos::task::spawn_local(async move {
            match board.client().create_task(&token, &NewTask::new(description)).await {
                Ok(task) => board.tasks.update(|tasks| tasks.push(task)),
                Err(e) => board.report(e),
            }
        });
    }

    fn toggle(&self, task: Task) {
        let Some(token) = self.token() else {
            return;
        };
        let board = self.clone();
        leptos::task::spawn_local(async move {
            match board.client().update_task(&token, task.id, &toggled(&task)).await {
                Ok(updated) => board.tasks.update(|tasks| replace_task(tasks, updated)),
                Err(e) => board.report(e),
            }
        });
    }

    fn remove(&self, task_id: i64) {
        let Some(token) = self.token() else {
            return;
        };
        let board = self.clone();
        leptos::task::spawn_local(async move {
            match board.client().delete_task(&token, task_id).await {
                Ok(()) => board.tasks.update(|tasks| remove_task(tasks, task_id)),
                Err(e) => board.report(e),
            }
        });
    }
}

#[cfg(not(feature = "csr"))]
impl TaskBoard {
    fn load(&self) {
        let signed_in = self.auth.with_untracked(SessionStore::is_authenticated);
        log::debug!("tasks: no transport, signed in: {signed_in}");
        self.loading.set(false);
    }

    fn add(&self, description: String) {
        let base_url = &self.config.base_url;
        log::debug!("tasks: add not sent to {base_url}: {description:?}");
    }

    fn toggle(&self, task: Task) {
        let base_url = &self.config.base_url;
        log::debug!("tasks: toggle of {} not sent to {base_url}", task.id);
    }

    fn remove(&self, task_id: i64) {
        let base_url = &self.config.base_url;
        log::debug!("tasks: delete of {task_id} not sent to {base_url}");
    }
}

#[component]
pub fn TasksPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<SessionStore>>();
    let board = TaskBoard {
        config: expect_context::<ClientConfig>(),
        auth,
        tasks: RwSignal::new(Vec::new()),
        info: RwSignal::new(String::new()),
        loading: RwSignal::new(true),
    };
    let draft = RwSignal::new(String::new());
    let tasks = board.tasks;
    let info = board.info;
    let loading = board.loading;

    board.load();

    let on_add = {
        let board = board.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            match validate_task_description(&draft.get()) {
                Ok(description) => {
                    info.set(String::new());
                    draft.set(String::new());
                    board.add(description);
                }
                Err(msg) => info.set(msg.to_owned()),
            }
        }
    };

    view! {
        <div class="tasks-page">
            <header class="tasks-page__header">
                <h1>"Tasks"</h1>
                <span class="tasks-page__count">
                    {move || format!("{} remaining", remaining_count(&tasks.get()))}
                </span>
                <button class="btn" on:click=move |_| sign_out(auth, info)>
                    "Sign Out"
                </button>
            </header>

            <form class="tasks-page__new" on:submit=on_add>
                <input
                    class="tasks-page__input"
                    type="text"
                    placeholder="What needs doing?"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">"Add"</button>
            </form>

            <Show when=move || !info.get().is_empty()>
                <p class="tasks-page__message">{move || info.get()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p>"Loading tasks..."</p> }
            >
                <ul class="tasks-page__list">
                    <For
                        each=move || tasks.get()
                        key=|task| (task.id, task.completed, task.description.clone())
                        children={
                            let board = board.clone();
                            move |task: Task| {
                                let toggle_board = board.clone();
                                let remove_board = board.clone();
                                let toggle_task = task.clone();
                                let task_id = task.id;
                                view! {
                                    <li class=item_class(task.completed)>
                                        <input
                                            type="checkbox"
                                            prop:checked=task.completed
                                            on:change=move |_| {
                                                toggle_board.toggle(toggle_task.clone());
                                            }
                                        />
                                        <span class="tasks-page__description">
                                            {task.description.clone()}
                                        </span>
                                        <button
                                            class="btn btn--danger"
                                            on:click=move |_| remove_board.remove(task_id)
                                        >
                                            "Delete"
                                        </button>
                                    </li>
                                }
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
