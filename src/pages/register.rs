use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::error::CurioError;
use crate::session::Session;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);

    let do_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        let api = api.clone();
        set_is_loading.set(true);
        set_message.set(None);
        spawn_local(async move {
            match session.register(&api, &user, &pass).await {
                Ok(()) => {
                    set_password.set(String::new());
                    set_message.set(Some(
                        "Registration successful! You can now log in.".to_string(),
                    ));
                }
                Err(e @ CurioError::Validation(_)) => set_message.set(Some(e.to_string())),
                Err(e) => set_message.set(Some(format!("Error: {}", e))),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="page auth-page">
            <h2>"Register"</h2>
            {move || match session.identity() {
                Some(name) => view! {
                    <p class="page-description">
                        {format!("You are already signed in as {}.", name)}
                    </p>
                }.into_any(),
                None => view! {
                    <form class="auth-form" on:submit=do_register.clone()>
                        <div class="form-group">
                            <label for="register-username">"Username"</label>
                            <input
                                id="register-username"
                                type="text"
                                class="input"
                                placeholder="Enter username"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="register-password">"Password"</label>
                            <input
                                id="register-password"
                                type="password"
                                class="input input-password"
                                placeholder="Enter password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <button type="submit" class="btn btn-primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Registering..." } else { "Register" }}
                        </button>
                    </form>
                }.into_any(),
            }}
            {move || message.get().map(|m| view! {
                <div class="alert alert-info">{m}</div>
            })}
        </div>
    }
}
