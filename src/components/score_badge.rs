use leptos::prelude::*;

use crate::detail::score_display;

#[component]
pub fn ScoreBadge(
    /// Net vote score of a comment
    score: i64,
) -> impl IntoView {
    let (text, tone) = score_display(score);

    view! {
        <p class="comment-score">
            "Score: "
            <span class={tone.class()}>{text}</span>
        </p>
    }
}
