//! Local chat archive. Every localStorage access in the app goes through
//! this module; components only see `load_all`/`upsert`/`delete`.

use crate::state::Conversation;
use leptos::logging::warn;
use web_sys::Storage;

/// Same key earlier clients used, so existing archives load unchanged.
pub const STORAGE_KEY: &str = "chatHistory";

fn storage() -> Option<Storage> {
    leptos::window().local_storage().ok().flatten()
}

/// Reads the whole archive. Absent or unparsable content is an empty archive.
pub fn load_all() -> Vec<Conversation> {
    let Some(storage) = storage() else {
        return Vec::new();
    };
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => decode(&raw),
        _ => Vec::new(),
    }
}

fn decode(raw: &str) -> Vec<Conversation> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        warn!("discarding unparsable chat history: {err}");
        Vec::new()
    })
}

fn persist(history: &[Conversation]) {
    let Some(storage) = storage() else {
        return;
    };
    match serde_json::to_string(history) {
        Ok(raw) => {
            if let Err(err) = storage.set_item(STORAGE_KEY, &raw) {
                warn!("failed to persist chat history: {err:?}");
            }
        }
        Err(err) => warn!("failed to encode chat history: {err}"),
    }
}

/// Replaces any record with the same id and persists. Returns the updated
/// archive so callers can publish it without a re-read.
pub fn upsert(conversation: Conversation) -> Vec<Conversation> {
    let mut history = load_all();
    upsert_into(&mut history, conversation);
    persist(&history);
    history
}

fn upsert_into(history: &mut Vec<Conversation>, conversation: Conversation) {
    history.retain(|c| c.id != conversation.id);
    history.push(conversation);
}

/// Removes the record with `id` (a no-op if absent) and persists.
pub fn delete(id: &str) -> Vec<Conversation> {
    let mut history = load_all();
    remove_from(&mut history, id);
    persist(&history);
    history
}

fn remove_from(history: &mut Vec<Conversation>, id: &str) {
    history.retain(|c| c.id != id);
}
