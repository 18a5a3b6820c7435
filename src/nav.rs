use crate::state::{Conversation, Tab};
use ev::MouseEvent;
use leptos::*;

fn by_recency(mut history: Vec<Conversation>) -> Vec<Conversation> {
    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    history
}

#[component]
pub fn Nav<N, L, D>(
    history: ReadSignal<Vec<Conversation>>,
    current_id: ReadSignal<Option<String>>,
    active_tab: RwSignal<Tab>,
    on_new_chat: N,
    on_load_chat: L,
    on_delete_chat: D,
) -> impl IntoView
where
    N: FnMut() + 'static + Clone,
    L: FnMut(Conversation) + 'static + Clone,
    D: FnMut(String) + 'static + Clone,
{
    let tab_class = move |tab: Tab| {
        if active_tab.get() == tab {
            "grow p-2 text-sm font-medium rounded-lg bg-gray-800 text-white dark:bg-gray-700"
        } else {
            "grow p-2 text-sm font-medium rounded-lg text-gray-500 hover:bg-gray-100 dark:text-gray-400 dark:hover:bg-gray-800"
        }
    };
    let mut new_chat = on_new_chat.clone();
    view! {
        <div class="lg:w-1/5 w-full flex flex-col border-e-2 dark:border-gray-800 min-h-dvh max-h-dvh overflow-y-auto dark:text-white">
            <div class="flex flex-row items-center m-4">
                <h5 class="text-base py-2.5 font-semibold text-gray-500 uppercase dark:text-gray-400 w-full">
                    "STACBot"
                </h5>
                <button
                    type="button"
                    class="text-white bg-gray-800 hover:bg-gray-900 focus:outline-none focus:ring-4 focus:ring-gray-300 font-medium rounded-lg text-sm px-5 py-2.5 dark:bg-gray-800 dark:hover:bg-gray-700 dark:focus:ring-gray-700 dark:border-gray-700"
                    on:click=move |_| new_chat()
                >
                    "＋"
                </button>
            </div>
            <div class="flex flex-row gap-2 mx-4 mb-4">
                <button type="button" class=move || tab_class(Tab::Chat) on:click=move |_| active_tab.set(Tab::Chat)>
                    "Chat"
                </button>
                <button
                    type="button"
                    class=move || tab_class(Tab::Feedback)
                    on:click=move |_| active_tab.set(Tab::Feedback)
                >
                    "Offline Feedback"
                </button>
            </div>
            {move || {
                if active_tab.get() != Tab::Chat {
                    return None;
                }
                let on_load_chat = on_load_chat.clone();
                let on_delete_chat = on_delete_chat.clone();
                Some(
                    view! {
                        <div class="py-4 overflow-y-auto grow">
                            <h5 class="text-sm font-semibold text-gray-500 uppercase dark:text-gray-400 mb-2">
                                "🕘 Chat History"
                            </h5>
                            <ul class="space-y-2 font-medium">
                                {move || {
                                    by_recency(history.get())
                                        .into_iter()
                                        .map(|conv| {
                                            let title = format!("🗂 {}", conv.title);
                                            let id = conv.id.clone();
                                            let delete_id = conv.id.clone();
                                            let mut load = on_load_chat.clone();
                                            let mut delete = on_delete_chat.clone();
                                            let is_active = move || {
                                                current_id.get().as_deref() == Some(&id[..])
                                            };
                                            let onload = move |ev: MouseEvent| {
                                                ev.prevent_default();
                                                load(conv.clone());
                                            };
                                            let ondelete = move |ev: MouseEvent| {
                                                ev.prevent_default();
                                                ev.stop_propagation();
                                                delete(delete_id.clone());
                                            };

                                            view! {
                                                <li
                                                    class="flex items-center p-2 mx-2 text-gray-900 rounded-lg dark:text-white hover:bg-gray-100 dark:hover:bg-gray-700 group"
                                                    class=("bg-gray-100", is_active.clone())
                                                    class=("dark:bg-gray-700", is_active)
                                                    on:click=onload
                                                >
                                                    <span class="grow text-left text-sm truncate cursor-pointer">
                                                        {title}
                                                    </span>
                                                    <span
                                                        class="ps-2 cursor-pointer text-red-500"
                                                        title="Delete chat"
                                                        on:click=ondelete
                                                    >
                                                        "🗑️"
                                                    </span>
                                                </li>
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                }}
                            </ul>
                        </div>
                    },
                )
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn history_lists_most_recent_first() {
        let conv = |id: &str, hour: u32| Conversation {
            id: id.to_owned(),
            title: id.to_owned(),
            messages: Vec::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 4, 29, hour, 0, 0).unwrap(),
        };
        // Stored in insertion order T1 < T2 < T3.
        let history = vec![conv("t1", 1), conv("t2", 2), conv("t3", 3)];
        let ordered = by_recency(history);
        let ids: Vec<_> = ordered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["t3", "t2", "t1"]);
    }
}
