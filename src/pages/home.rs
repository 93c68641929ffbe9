use leptos::prelude::*;

use crate::session::Session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<Session>();

    view! {
        <div class="page home-page">
            {move || match session.identity() {
                Some(name) => view! {
                    <h2>{format!("Welcome, {}!", name)}</h2>
                    <p class="page-description">
                        "Browse what the community has found."
                    </p>
                    <div class="card-grid">
                        <div class="card">
                            <h3>"All Posts"</h3>
                            <p>"Every object shared so far"</p>
                            <a href="/posts" class="btn btn-primary">"Browse Posts"</a>
                        </div>
                        <div class="card">
                            <h3>"Hot Posts"</h3>
                            <p>"The objects drawing the most interest"</p>
                            <a href="/posts/hot" class="btn btn-primary">"See What's Hot"</a>
                        </div>
                        <div class="card">
                            <h3>"Share an Object"</h3>
                            <p>"Describe something curious and tag it"</p>
                            <a href="/posts/new" class="btn btn-primary">"Create Post"</a>
                        </div>
                    </div>
                }.into_any(),
                None => view! {
                    <h2>"Welcome to Curio"</h2>
                    <p class="page-description">
                        "Please "
                        <a href="/login">"Login"</a>
                        " or "
                        <a href="/register">"Register"</a>
                        " to continue."
                    </p>
                }.into_any(),
            }}
        </div>
    }
}
