use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::post_card::PostCard;
use crate::config::ClientConfig;
use crate::models::PostId;
use crate::posts::{CollectionView, Feed, PostListController};
use crate::session::Session;

/// A grid of posts for one feed, reloaded whenever the feed changes.
#[component]
pub fn PostFeed(#[prop(into)] feed: Signal<Feed>) -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();
    let config = expect_context::<ClientConfig>();
    let list = PostListController::new();

    let load_api = api.clone();
    Effect::new(move |_| {
        let feed = feed.get();
        let api = load_api.clone();
        spawn_local(async move {
            list.load_collection(&api, &feed).await;
        });
    });

    let on_interest = Callback::new(move |post_id: PostId| {
        let api = api.clone();
        spawn_local(async move {
            let _ = list.apply_interest_toggle(&api, post_id).await;
        });
    });

    view! {
        {move || list.notice().get().map(|n| view! {
            <div class="alert alert-warning" on:click=move |_| list.dismiss_notice()>{n}</div>
        })}

        {move || {
            let current = list.view().get();
            let feed_now = feed.get();
            if let Some(notice) = current.empty_notice(&feed_now) {
                return view! { <p class="empty-notice">{notice}</p> }.into_any();
            }

            match current {
                CollectionView::Loading => view! {
                    <p class="loading">"Loading..."</p>
                }.into_any(),
                CollectionView::Failed(e) => view! {
                    <div class="page-error">
                        <span class="status-text status-error">{format!("Error: {}", e)}</span>
                    </div>
                }.into_any(),
                CollectionView::Loaded(posts) => {
                    let interest = session.is_authenticated().then_some(on_interest);
                    let show_description = matches!(feed_now, Feed::Search(_));
                    let cards: Vec<_> = posts.into_iter().map(|post| {
                        let image_src = post.image_ref.as_deref().map(|r| config.resolve_media(r));
                        view! {
                            <PostCard
                                post=post
                                image_src=image_src
                                on_interest=interest
                                show_description=show_description
                            />
                        }
                    }).collect();

                    view! { <div class="card-grid">{cards}</div> }.into_any()
                }
            }
        }}
    }
}

#[component]
pub fn PostsPage() -> impl IntoView {
    let session = expect_context::<Session>();

    view! {
        <div class="page posts-page">
            <h2>"Posts"</h2>
            <div class="page-actions">
                <Show when=move || session.is_authenticated()>
                    <a href="/posts/new" class="btn btn-success">"Create New Post"</a>
                </Show>
                <a href="/posts/hot" class="btn btn-success">"Hot Posts \u{1F525}"</a>
            </div>
            <PostFeed feed=Feed::All />
        </div>
    }
}

#[component]
pub fn HotPostsPage() -> impl IntoView {
    view! {
        <div class="page posts-page">
            <h2>"\u{1F525} Hot Posts"</h2>
            <div class="page-actions">
                <a href="/posts" class="btn btn-success">"All Posts"</a>
            </div>
            <PostFeed feed=Feed::Hot />
        </div>
    }
}

#[component]
pub fn SearchResultsPage() -> impl IntoView {
    let query_map = use_query_map();
    let query = Memo::new(move |_| {
        query_map
            .read()
            .get("query")
            .map(|q| q.trim().to_string())
            .unwrap_or_default()
    });
    let feed = Signal::derive(move || Feed::Search(query.get()));

    view! {
        <div class="page posts-page">
            <h2>{move || format!("Search Results for \"{}\"", query.get())}</h2>
            <Show
                when=move || !query.get().is_empty()
                fallback=|| view! { <p class="page-description">"Enter a search term above."</p> }
            >
                <PostFeed feed=feed />
            </Show>
        </div>
    }
}
