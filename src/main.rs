mod api;
mod app;
mod conversation;
mod feedback;
mod loading;
mod message;
mod nav;
mod sanitize;
mod state;
mod storage;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
