use leptos::prelude::*;

use crate::models::{PostId, PostSummary};

#[component]
pub fn PostCard(
    post: PostSummary,
    /// Absolute image URL, already resolved against the backend origin.
    image_src: Option<String>,
    /// Present only when the viewer may mark interest.
    on_interest: Option<Callback<PostId>>,
    #[prop(default = false)] show_description: bool,
) -> impl IntoView {
    let post_id = post.id;
    let detail_href = format!("/posts/{}", post_id);
    let description = post
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    view! {
        <div class="post-card">
            <div class="post-card-media">
                {image_src.map(|src| view! {
                    <img src=src class="post-card-image" alt={post.title.clone()} />
                })}
                {match on_interest {
                    Some(cb) => view! {
                        <button
                            class="btn btn-light post-card-interest"
                            on:click=move |_| cb.run(post_id)
                        >
                            {format!("\u{2764}\u{FE0F} {}", post.interest_count)}
                        </button>
                    }.into_any(),
                    None => view! {
                        <span class="post-card-interest">
                            {format!("Interest: {}", post.interest_count)}
                        </span>
                    }.into_any(),
                }}
            </div>
            <div class="post-card-body">
                <h5 class="post-card-title">{post.title.clone()}</h5>
                {if show_description {
                    view! { <p class="post-card-text">{description}</p> }.into_any()
                } else {
                    view! {
                        <p class="post-card-text">
                            <strong>"Creator: "</strong>
                            {post.creator.clone()}
                        </p>
                    }.into_any()
                }}
                <a href=detail_href class="btn btn-primary">"View Details"</a>
            </div>
        </div>
    }
}
