#[cfg(feature = "csr")]
fn main() {
    tasks_client::mount();
}

#[cfg(not(feature = "csr"))]
fn main() {
    eprintln!("tasks-client runs in the browser: use `trunk serve`");
}
