use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::session::Session;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();
    let navigate = use_navigate();

    let (search_text, set_search_text) = signal(String::new());
    let (logout_error, set_logout_error) = signal::<Option<String>>(None);

    let do_logout = move |_| {
        let api = api.clone();
        set_logout_error.set(None);
        spawn_local(async move {
            if let Err(e) = session.logout(&api).await {
                set_logout_error.set(Some(format!("Logout failed: {}", e)));
            }
        });
    };

    let do_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = search_text.get_untracked();
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let target = format!("/search?query={}", encoded);
        navigate(&target, Default::default());
    };

    view! {
        <nav class="navbar">
            <div class="navbar-header">
                <a href="/" class="navbar-title">"Curio"</a>
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/posts" class="nav-link">"Posts"</a>
                </li>
                <li class="nav-item">
                    <a href="/posts/hot" class="nav-link">"Hot"</a>
                </li>
                {move || match session.identity() {
                    Some(name) => view! {
                        <li class="nav-item">
                            <span class="nav-link">{format!("Welcome, {}", name)}</span>
                        </li>
                        <li class="nav-item">
                            <button class="nav-link btn btn-link" on:click=do_logout.clone()>
                                "Logout"
                            </button>
                        </li>
                    }.into_any(),
                    None => view! {
                        <li class="nav-item">
                            <a href="/login" class="nav-link">"Login"</a>
                        </li>
                        <li class="nav-item">
                            <a href="/register" class="nav-link">"Register"</a>
                        </li>
                    }.into_any(),
                }}
            </ul>
            <form class="nav-search" on:submit=do_search>
                <input
                    type="search"
                    class="input"
                    placeholder="Search posts..."
                    prop:value=move || search_text.get()
                    on:input=move |ev| set_search_text.set(event_target_value(&ev))
                />
            </form>
            {move || logout_error.get().map(|e| view! {
                <span class="status-text status-error">{e}</span>
            })}
        </nav>
    }
}
