use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::error::CurioError;
use crate::session::Session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);

    let do_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        let api = api.clone();
        let navigate = navigate.clone();
        set_is_loading.set(true);
        set_message.set(None);
        spawn_local(async move {
            match session.login(&api, &user, &pass).await {
                Ok(_) => {
                    set_message.set(Some("Login successful!".to_string()));
                    navigate("/", Default::default());
                }
                Err(e @ CurioError::Validation(_)) => set_message.set(Some(e.to_string())),
                Err(e) => {
                    // The typed username stays in the form for another try
                    set_message.set(Some(format!("Error: {}", e)));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Login"</h2>
            <form class="auth-form" on:submit=do_login>
                <div class="form-group">
                    <label for="login-username">"Username"</label>
                    <input
                        id="login-username"
                        type="text"
                        class="input"
                        placeholder="Enter username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        type="password"
                        class="input input-password"
                        placeholder="Enter password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                    {move || if is_loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            {move || message.get().map(|m| view! {
                <div class="alert alert-info">{m}</div>
            })}
        </div>
    }
}
