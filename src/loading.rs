use leptos::*;

/// Bot-styled row shown while a request is awaiting its answer.
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-start m-5 gap-2.5">
            <span class="text-2xl">"🤖"</span>
            <div class="flex flex-col leading-1.5 p-4 bg-gray-100 rounded-e-xl rounded-es-xl dark:bg-gray-700">
                <p class="text-sm italic text-gray-500 dark:text-gray-400">
                    "STACBot is thinking, Please wait ..."
                </p>
            </div>
        </div>
    }
}
