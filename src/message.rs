use crate::state::{MatchedFeedback, Message as Msg, Role, SourceExcerpt};
use leptos::*;

const PREVIEW_LENGTH: usize = 300;

fn combined_sources(sources: &[SourceExcerpt]) -> String {
    sources
        .iter()
        .map(|src| format!("{}: {}", src.source, src.content_excerpt))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn combined_feedbacks(feedbacks: &[MatchedFeedback]) -> String {
    feedbacks
        .iter()
        .enumerate()
        .map(|(idx, fb)| {
            let score = fb
                .score
                .map(|score| format!("{score:.2}"))
                .unwrap_or_else(|| "N/A".to_owned());
            format!(
                "Feedback # {} (Score: {})\nQuestion: {}\nFeedback: {}",
                idx + 1,
                score,
                fb.payload.question_asked,
                fb.payload.helpful_feedback
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `Some(truncated + "...")` when the text overflows the preview window,
/// `None` when it already fits.
fn preview(text: &str) -> Option<String> {
    if text.chars().count() > PREVIEW_LENGTH {
        let mut shortened: String = text.chars().take(PREVIEW_LENGTH).collect();
        shortened.push_str("...");
        Some(shortened)
    } else {
        None
    }
}

#[component]
pub fn Message(message: Msg) -> impl IntoView {
    let is_user = message.role == Role::User;
    let avatar = if is_user { "🧑" } else { "🤖" };
    match message.content.as_answer() {
        Some(answer) => {
            let parser = pulldown_cmark::Parser::new(answer);
            let mut parsed = String::new();
            pulldown_cmark::html::push_html(&mut parsed, parser);
            let sources = message
                .sources
                .map(|set| set.openai)
                .filter(|sources| !sources.is_empty());
            let feedbacks = message
                .feedbacks
                .filter(|feedbacks| !feedbacks.is_empty());
            view! {
                <div class="flex items-start m-5 gap-2.5">
                    <span class="text-2xl">{avatar}</span>
                    <div class="flex flex-col leading-1.5 p-4 max-w-[90%] bg-gray-100 rounded-e-xl rounded-es-xl dark:bg-gray-700">
                        <div
                            class="text-sm font-normal text-gray-900 dark:text-white whitespace-pre-wrap"
                            inner_html=parsed
                        />
                        {sources.map(|sources| view! { <Sources sources=sources /> })}
                        {feedbacks.map(|feedbacks| view! { <Feedbacks feedbacks=feedbacks /> })}
                    </div>
                </div>
            }
        }
        None => {
            let text = message.content.as_text().unwrap_or_default().to_owned();
            view! {
                <div class="flex items-start m-5 gap-2.5" class:flex-row-reverse=move || is_user>
                    <span class="text-2xl">{avatar}</span>
                    <div class="flex flex-col leading-1.5 p-4 max-w-[90%] bg-blue-100 rounded-s-xl rounded-ee-xl dark:bg-blue-900">
                        <p class="text-sm font-normal text-gray-900 dark:text-white whitespace-pre-wrap">
                            {text}
                        </p>
                    </div>
                </div>
            }
        }
    }
}

#[component]
fn Sources(sources: Vec<SourceExcerpt>) -> impl IntoView {
    let total = sources.len();
    let combined = combined_sources(&sources);
    view! {
        <ExcerptPanel
            heading="Sources:"
            count=format!("Total sources: {total}")
            combined=combined
        />
    }
}

#[component]
fn Feedbacks(feedbacks: Vec<MatchedFeedback>) -> impl IntoView {
    let total = feedbacks.len();
    let combined = combined_feedbacks(&feedbacks);
    view! {
        <ExcerptPanel
            heading="Matched Offline Feedbacks:"
            count=format!("Total feedbacks: {total}")
            combined=combined
        />
    }
}

/// Expandable text panel shared by the sources and matched-feedback views.
#[component]
fn ExcerptPanel(heading: &'static str, count: String, combined: String) -> impl IntoView {
    let (show_all, set_show_all) = create_signal(false);
    let shortened = preview(&combined);
    let expandable = shortened.is_some();
    let body = move || {
        if show_all.get() {
            combined.clone()
        } else {
            shortened.clone().unwrap_or_else(|| combined.clone())
        }
    };
    view! {
        <div class="mt-3">
            <h5 class="inline text-sm font-semibold">
                {heading}
                " "
                {expandable
                    .then(|| {
                        view! {
                            <button
                                class="text-blue-600 dark:text-blue-400 cursor-pointer"
                                on:click=move |_| set_show_all.update(|s| *s = !*s)
                            >
                                {move || if show_all.get() { "Show Less" } else { "Show More" }}
                            </button>
                        }
                    })}
            </h5>
            <div class="text-xs text-gray-500 dark:text-gray-400 mt-1 mb-2">{count}</div>
            <pre class="whitespace-pre-wrap text-xs bg-gray-50 dark:bg-gray-800 border border-gray-300 dark:border-gray-600 rounded p-2 mt-1 overflow-hidden">
                {body}
            </pre>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedbackPayload;

    #[test]
    fn markdown_renders_answers() {
        let markdown_input = "hello world";
        let parser = pulldown_cmark::Parser::new(markdown_input);
        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, parser);
        assert_eq!(&html_output, "<p>hello world</p>\n");
    }

    #[test]
    fn sources_combine_with_blank_lines() {
        let sources = vec![
            SourceExcerpt {
                source: "a.md".to_owned(),
                content_excerpt: "first excerpt".to_owned(),
            },
            SourceExcerpt {
                source: "b.md".to_owned(),
                content_excerpt: "second excerpt".to_owned(),
            },
        ];
        assert_eq!(
            combined_sources(&sources),
            "a.md: first excerpt\n\nb.md: second excerpt"
        );
    }

    #[test]
    fn feedbacks_format_with_index_and_score() {
        let feedbacks = vec![
            MatchedFeedback {
                score: Some(0.8765),
                payload: FeedbackPayload {
                    question_asked: "q1".to_owned(),
                    helpful_feedback: "f1".to_owned(),
                    ..Default::default()
                },
            },
            MatchedFeedback {
                score: None,
                payload: FeedbackPayload {
                    question_asked: "q2".to_owned(),
                    helpful_feedback: "f2".to_owned(),
                    ..Default::default()
                },
            },
        ];
        assert_eq!(
            combined_feedbacks(&feedbacks),
            "Feedback # 1 (Score: 0.88)\nQuestion: q1\nFeedback: f1\n\n\
             Feedback # 2 (Score: N/A)\nQuestion: q2\nFeedback: f2"
        );
    }

    #[test]
    fn preview_truncates_only_past_the_window() {
        assert_eq!(preview("short"), None);

        let exact: String = "x".repeat(PREVIEW_LENGTH);
        assert_eq!(preview(&exact), None);

        let long: String = "x".repeat(PREVIEW_LENGTH + 1);
        let shortened = preview(&long).unwrap();
        assert_eq!(shortened.chars().count(), PREVIEW_LENGTH + 3);
        assert!(shortened.ends_with("..."));
    }
}
