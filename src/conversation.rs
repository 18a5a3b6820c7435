use crate::api;
use crate::loading::Loading;
use crate::message::Message;
use crate::state::{self, Conversation as ChatRecord, Message as Msg};
use crate::storage;
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

#[component]
pub fn Conversation(
    messages: RwSignal<Vec<Msg>>,
    current_id: RwSignal<Option<String>>,
    history: WriteSignal<Vec<ChatRecord>>,
    loading: RwSignal<bool>,
) -> impl IntoView {
    let (input, set_input) = create_signal(String::new());

    let end_ref: NodeRef<html::Div> = create_node_ref();
    // Don't scroll on the first render, only when the list changes afterward.
    let initial_render = store_value(true);
    create_effect(move |_| {
        messages.track();
        if initial_render.get_value() {
            initial_render.set_value(false);
            return;
        }
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    let update_input = move |ev| {
        let v = event_target_value(&ev);
        set_input.set(v);
    };
    let send_message = move |ev: SubmitEvent| {
        ev.prevent_default();
        // One request in flight per conversation.
        if loading.get() {
            return;
        }
        let text = input.get();
        if text.trim().is_empty() {
            return;
        }
        let chat_id = current_id.get().unwrap_or_else(state::fresh_id);
        current_id.set(Some(chat_id.clone()));

        // The endpoint choice and the follow-up context come from the list
        // *before* this send.
        let prior = messages.get();
        let mut shown = prior.clone();
        shown.push(Msg::user(text.clone()));
        messages.set(shown.clone());
        set_input.set(String::new());
        loading.set(true);

        spawn_local(async move {
            match api::ask(&prior, &text).await {
                Ok(reply) => {
                    shown.push(reply);
                    messages.set(shown.clone());
                    history.set(storage::upsert(ChatRecord::snapshot(&chat_id, &shown)));
                }
                Err(err) => error!("Failed to fetch: {err}"),
            }
            loading.set(false);
        });
    };

    view! {
        <div class="h-dvh max-h-dvh grow flex flex-col scrollbar lg:w-4/5 w-screen max-w-screen">
            <main class="grow flex flex-col overflow-auto max-h-screen">
                {move || {
                    messages
                        .get()
                        .into_iter()
                        .map(|message| {
                            view! { <Message message=message /> }
                        })
                        .collect::<Vec<_>>()
                }}
                {move || loading.get().then(|| view! { <Loading /> })}
                <div node_ref=end_ref />
            </main>
            <form class="w-full" on:submit=send_message>
                <label for="chat" class="sr-only">
                    "Your message"
                </label>
                <div class="flex items-center px-3 py-2 bg-gray-50 dark:bg-gray-700">
                    <input
                        id="chat"
                        class="block mx-4 p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500"
                        placeholder="Ask something..."
                        on:input=update_input
                        prop:value=input
                    />
                    <button
                        type="submit"
                        class="inline-flex justify-center p-2 text-blue-600 rounded-full cursor-pointer hover:bg-blue-100 dark:text-blue-500 dark:hover:bg-gray-600 disabled:opacity-50"
                        disabled=move || loading.get()
                    >
                        <svg
                            class="w-5 h-5 rotate-90 rtl:-rotate-90"
                            aria-hidden="true"
                            xmlns="http://www.w3.org/2000/svg"
                            fill="currentColor"
                            viewBox="0 0 18 20"
                        >
                            <path d="m17.914 18.594-8-18a1 1 0 0 0-1.828 0l-8 18a1 1 0 0 0 1.157 1.376L8 18.281V9a1 1 0 0 1 2 0v9.281l6.758 1.689a1 1 0 0 0 1.156-1.376Z" />
                        </svg>
                        <span class="sr-only">"Send message"</span>
                    </button>
                </div>
            </form>
        </div>
    }
}
