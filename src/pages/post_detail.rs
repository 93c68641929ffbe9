use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::score_badge::ScoreBadge;
use crate::config::ClientConfig;
use crate::detail::{tags_notice, DetailView, PostDetailController, NO_COMMENTS_NOTICE};
use crate::models::{CommentId, PostDetail, PostId};
use crate::session::Session;

/// Key attributes shown on the detail page, with their display labels.
fn attribute_rows(post: &PostDetail) -> Vec<(&'static str, String)> {
    vec![
        ("Description", text_or_na(&post.description)),
        ("Material", text_or_na(&post.material)),
        ("Length", measure_or_na(post.length, "cm")),
        ("Width", measure_or_na(post.width, "cm")),
        ("Height", measure_or_na(post.height, "cm")),
        ("Weight", measure_or_na(post.weight, "kg")),
        ("Color", text_or_na(&post.color)),
        ("Shape", text_or_na(&post.shape)),
        ("Location", text_or_na(&post.location)),
        ("Smell", text_or_na(&post.smell)),
        ("Taste", text_or_na(&post.taste)),
        ("Origin", text_or_na(&post.origin)),
    ]
}

fn text_or_na(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}

fn measure_or_na(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{} {}", v, unit))
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn PostDetailPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();
    let config = expect_context::<ClientConfig>();
    let detail = PostDetailController::new();

    let params = use_params_map();
    let post_id = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|id| id.parse::<PostId>().ok())
    });

    let load_api = api.clone();
    Effect::new(move |_| {
        if let Some(id) = post_id.get() {
            let api = load_api.clone();
            spawn_local(async move {
                detail.load_detail(&api, id).await;
            });
        }
    });

    let comment_api = api.clone();
    let submit_comment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = post_id.get_untracked() else {
            return;
        };
        let content = detail.comment_draft().get_untracked();
        let api = comment_api.clone();
        spawn_local(async move {
            let _ = detail.submit_comment(&api, id, &content).await;
        });
    };

    let vote = Callback::new(move |(comment_id, is_upvote): (CommentId, bool)| {
        let Some(id) = post_id.get_untracked() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            let _ = detail.submit_vote(&api, id, comment_id, is_upvote).await;
        });
    });

    view! {
        <div class="page detail-page">
            {move || {
                if post_id.get().is_none() {
                    return view! {
                        <p class="status-text status-error">"Invalid post id"</p>
                    }.into_any();
                }

                match detail.view().get() {
                    DetailView::Loading => view! {
                        <p class="loading">"Loading..."</p>
                    }.into_any(),
                    DetailView::Failed(e) => view! {
                        <div class="page-error">
                            <span class="status-text status-error">{e}</span>
                        </div>
                    }.into_any(),
                    DetailView::Loaded(post) => {
                        let image_src = post.image_ref.as_deref().map(|r| config.resolve_media(r));
                        let rows = attribute_rows(&post)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div class="spec-row">
                                    <span class="spec-label">{label}</span>
                                    <span class="spec-value">{value}</span>
                                </div>
                            })
                            .collect_view();

                        let tags_view = match tags_notice(&post.tags) {
                            Some(notice) => view! { <p>{notice}</p> }.into_any(),
                            None => {
                                let items = post.tags.iter().map(|tag| {
                                    let label = match tag.external_reference_url.clone() {
                                        Some(href) => view! {
                                            <a href=href target="_blank" rel="noopener noreferrer" class="tag-link">
                                                {tag.label.clone()}
                                            </a>
                                        }.into_any(),
                                        None => view! {
                                            <span class="tag-label">{tag.label.clone()}</span>
                                        }.into_any(),
                                    };
                                    view! {
                                        <li class="tag-item">
                                            {label}
                                            {tag.description.clone().map(|d| view! {
                                                <p class="tag-description">{d}</p>
                                            })}
                                        </li>
                                    }
                                }).collect_view();
                                view! { <ul class="tag-list">{items}</ul> }.into_any()
                            }
                        };

                        let can_act = session.is_authenticated();
                        let comments_view = if post.comments.is_empty() {
                            view! { <p>{NO_COMMENTS_NOTICE}</p> }.into_any()
                        } else {
                            post.comments.iter().map(|comment| {
                                let comment_id = comment.id;
                                view! {
                                    <div class="comment">
                                        <p>
                                            <strong>{format!("{}:", comment.author.username)}</strong>
                                            " "
                                            {comment.content.clone()}
                                        </p>
                                        <ScoreBadge score=comment.score />
                                        <Show when=move || can_act>
                                            <div class="comment-actions">
                                                <button
                                                    type="button"
                                                    class="btn btn-sm btn-upvote"
                                                    on:click=move |_| vote.run((comment_id, true))
                                                >
                                                    "Upvote"
                                                </button>
                                                <button
                                                    type="button"
                                                    class="btn btn-sm btn-downvote"
                                                    on:click=move |_| vote.run((comment_id, false))
                                                >
                                                    "Downvote"
                                                </button>
                                            </div>
                                        </Show>
                                    </div>
                                }
                            }).collect_view().into_any()
                        };

                        view! {
                            <h2>{post.title.clone()}</h2>
                            <p><strong>"Creator: "</strong>{post.creator.clone()}</p>
                            {image_src.map(|src| view! {
                                <img src=src class="detail-image" alt={post.title.clone()} />
                            })}
                            <div class="detail-specs">{rows}</div>
                            <div class="detail-tags">
                                <h3>"Tags:"</h3>
                                {tags_view}
                            </div>
                            <hr />
                            <h3>"Comments"</h3>
                            {comments_view}
                        }.into_any()
                    }
                }
            }}

            {move || detail.notice().get().map(|n| view! {
                <div class="alert alert-warning">{n}</div>
            })}

            {move || {
                if !matches!(detail.view().get(), DetailView::Loaded(_)) {
                    return view! { <div style="display:none"></div> }.into_any();
                }
                if session.is_authenticated() {
                    view! {
                        <form class="comment-form" on:submit=submit_comment.clone()>
                            <div class="form-group">
                                <label for="new-comment">"Add a Comment"</label>
                                <textarea
                                    id="new-comment"
                                    class="input"
                                    rows="3"
                                    placeholder="Write your comment here..."
                                    prop:value=move || detail.comment_draft().get()
                                    on:input=move |ev| detail.comment_draft().set(event_target_value(&ev))
                                ></textarea>
                            </div>
                            <button type="submit" class="btn btn-primary">"Submit Comment"</button>
                        </form>
                    }.into_any()
                } else {
                    view! {
                        <p class="comment-login-prompt">
                            "Please " <a href="/login">"login"</a> " to comment."
                        </p>
                    }.into_any()
                }
            }}
        </div>
    }
}
