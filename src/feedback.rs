use crate::api;
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

pub const STATUS_MISSING_FIELDS: &str = "Please fill all required fields";
const STATUS_SAVING: &str = "Saving feedback...";
const STATUS_SAVED: &str = "Feedback saved successfully!";
const STATUS_FAILED: &str = "Failed to save feedback";
const STATUS_ERROR: &str = "Error saving feedback";

/// Question and feedback are required; the received answer is optional.
fn validate(question: &str, feedback: &str) -> bool {
    !question.is_empty() && !feedback.is_empty()
}

/// Standalone form persisting an ad-hoc feedback record. Field state lives in
/// `App` so switching tabs keeps a half-written form.
#[component]
pub fn OfflineFeedback(
    question: RwSignal<String>,
    answer: RwSignal<String>,
    feedback: RwSignal<String>,
    status: RwSignal<String>,
) -> impl IntoView {
    let save_feedback = move |ev: SubmitEvent| {
        ev.prevent_default();
        let q = question.get();
        let a = answer.get();
        let f = feedback.get();
        if !validate(&q, &f) {
            status.set(STATUS_MISSING_FIELDS.to_owned());
            return;
        }
        status.set(STATUS_SAVING.to_owned());
        spawn_local(async move {
            match api::save_offline_feedback(&q, &a, &f).await {
                Ok(true) => {
                    status.set(STATUS_SAVED.to_owned());
                    question.set(String::new());
                    answer.set(String::new());
                    feedback.set(String::new());
                }
                Ok(false) => status.set(STATUS_FAILED.to_owned()),
                Err(err) => {
                    error!("{err}");
                    status.set(STATUS_ERROR.to_owned());
                }
            }
        });
    };

    let textarea_class = "block w-full p-2.5 text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";
    view! {
        <div class="h-dvh max-h-dvh grow flex flex-col lg:w-4/5 w-screen max-w-screen p-5">
            <h2 class="text-xl font-semibold text-gray-900 dark:text-white mb-4">
                "Offline Feedback"
            </h2>
            <form class="flex flex-col gap-3" on:submit=save_feedback>
                <textarea
                    rows="2"
                    class=textarea_class
                    placeholder="Question"
                    prop:value=question
                    on:input=move |ev| question.set(event_target_value(&ev))
                ></textarea>
                <textarea
                    rows="4"
                    class=textarea_class
                    placeholder="Helpful Feedback"
                    prop:value=feedback
                    on:input=move |ev| feedback.set(event_target_value(&ev))
                ></textarea>
                <textarea
                    rows="4"
                    class=textarea_class
                    placeholder="Answer Received (Optional)"
                    prop:value=answer
                    on:input=move |ev| answer.set(event_target_value(&ev))
                ></textarea>
                <button
                    type="submit"
                    class="self-start text-white bg-gray-800 hover:bg-gray-900 focus:outline-none focus:ring-4 focus:ring-gray-300 font-medium rounded-lg text-sm px-5 py-2.5 dark:bg-gray-800 dark:hover:bg-gray-700 dark:focus:ring-gray-700"
                >
                    "Save Feedback"
                </button>
            </form>
            <div class="mt-3 text-sm text-gray-500 dark:text-gray-400">{move || status.get()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_and_feedback_are_required() {
        assert!(!validate("", "helpful"));
        assert!(!validate("a question", ""));
        assert!(!validate("", ""));
        assert!(validate("a question", "helpful"));
    }

    #[test]
    fn emptiness_is_checked_untrimmed() {
        // Whitespace counts as filled, matching what the form has always done.
        assert!(validate(" ", "helpful"));
    }
}
