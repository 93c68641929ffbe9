use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::components::nav_bar::NavBar;
use crate::config::ClientConfig;
use crate::pages::create_post::CreatePostPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::post_detail::PostDetailPage;
use crate::pages::post_list::{HotPostsPage, PostsPage, SearchResultsPage};
use crate::pages::register::RegisterPage;
use crate::session::Session;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        warn!("{}; using {}", e, crate::config::DEFAULT_BACKEND_ORIGIN);
        ClientConfig::default()
    });
    let api = HttpBackend::new(config.clone());
    let session = Session::new();

    provide_context(config);
    provide_context(api.clone());
    provide_context(session);

    // Hydrate the session once on start
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            session.probe(&api).await;
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <NavBar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                        <Route path=path!("/posts") view=PostsPage />
                        <Route path=path!("/posts/hot") view=HotPostsPage />
                        <Route path=path!("/posts/new") view=CreatePostPage />
                        <Route path=path!("/posts/:id") view=PostDetailPage />
                        <Route path=path!("/search") view=SearchResultsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
