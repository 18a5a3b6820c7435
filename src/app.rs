use crate::conversation::Conversation as Conv;
use crate::feedback::OfflineFeedback;
use crate::nav::Nav;
use crate::state::{self, Conversation, Message, Tab};
use crate::storage;
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    let messages: RwSignal<Vec<Message>> = create_rw_signal(Vec::new());
    let current_id: RwSignal<Option<String>> = create_rw_signal(None);
    let loading = create_rw_signal(false);
    let active_tab = create_rw_signal(Tab::Chat);
    let (history, set_history) = create_signal(storage::load_all());

    // Offline-feedback form state lives here so tab switches keep it.
    let feedback_question = create_rw_signal(String::new());
    let feedback_answer = create_rw_signal(String::new());
    let feedback_text = create_rw_signal(String::new());
    let feedback_status = create_rw_signal(String::new());

    let fresh_conversation = move || {
        messages.set(Vec::new());
        current_id.set(Some(state::fresh_id()));
    };

    let on_new_chat = move || {
        // Save the live conversation before leaving it.
        let live = messages.get();
        if !live.is_empty() {
            if let Some(id) = current_id.get() {
                set_history.set(storage::upsert(Conversation::snapshot(&id, &live)));
            }
        }
        fresh_conversation();
    };
    let on_load_chat = move |conversation: Conversation| {
        messages.set(conversation.messages);
        current_id.set(Some(conversation.id));
    };
    let on_delete_chat = move |id: String| {
        set_history.set(storage::delete(&id));
        if current_id.get().as_deref() == Some(&id[..]) {
            fresh_conversation();
        }
    };

    view! {
        <div class="flex flex-row">
            <Nav
                history
                current_id=current_id.read_only()
                active_tab
                on_new_chat
                on_load_chat
                on_delete_chat
            />
            {move || match active_tab.get() {
                Tab::Chat => {
                    view! {
                        <Conv
                            messages
                            current_id
                            history=set_history
                            loading
                        />
                    }
                        .into_view()
                }
                Tab::Feedback => {
                    view! {
                        <OfflineFeedback
                            question=feedback_question
                            answer=feedback_answer
                            feedback=feedback_text
                            status=feedback_status
                        />
                    }
                        .into_view()
                }
            }}
        </div>
    }
}
