use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout_with_handle;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use tracing::warn;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::api::{Backend, HttpBackend};
use crate::components::tag_picker::TagPicker;
use crate::error::CurioError;
use crate::lookup::TagLookup;
use crate::models::{DraftField, ImageUpload, PostDraft};
use crate::session::Session;

/// Pause on the success message before returning to the list.
const REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// Hand `action` to `schedule`; if no timer could be armed, run it now so
/// the user is never left on a finished form.
fn run_later<F>(action: F, schedule: impl FnOnce(Box<dyn FnOnce()>) -> bool)
where
    F: Fn() + Clone + 'static,
{
    let deferred = action.clone();
    if !schedule(Box::new(move || deferred())) {
        warn!("Could not arm redirect timer, navigating now");
        action();
    }
}

/// Read the first file of a file input into memory.
async fn read_image(
    input: Option<web_sys::HtmlInputElement>,
) -> Result<Option<ImageUpload>, CurioError> {
    let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| CurioError::Validation(format!("Could not read image: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };

    Ok(Some(ImageUpload {
        file_name: file.name(),
        content_type,
        bytes,
    }))
}

#[component]
fn DraftInput(draft: RwSignal<PostDraft>, field: DraftField) -> impl IntoView {
    let input_id = format!("draft-{}", field.name());
    let value = move || draft.with(|d| d.field(field).to_string());
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        draft.update(|d| *d.field_mut(field) = text);
    };

    view! {
        <div class="form-group">
            <label for={input_id.clone()}>{field.label()}</label>
            {if field == DraftField::Description {
                view! {
                    <textarea id=input_id class="input" prop:value=value on:input=on_input></textarea>
                }.into_any()
            } else {
                view! {
                    <input
                        id=input_id
                        type="text"
                        class="input"
                        required={field == DraftField::Title}
                        prop:value=value
                        on:input=on_input
                    />
                }.into_any()
            }}
        </div>
    }
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let api = expect_context::<HttpBackend>();
    let navigate = use_navigate();

    let draft = RwSignal::new(PostDraft::default());
    let lookup = TagLookup::new();
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let (is_submitting, set_is_submitting) = signal(false);
    let (message, set_message) = signal::<Option<String>>(None);

    let do_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut submission = draft.get_untracked();
        if let Err(e) = submission.validate() {
            set_message.set(Some(e.to_string()));
            return;
        }
        submission.tags = lookup.tag_values();

        let input = file_ref.get_untracked();
        let api = api.clone();
        let navigate = navigate.clone();
        set_is_submitting.set(true);
        set_message.set(None);
        spawn_local(async move {
            let result = match read_image(input).await {
                Ok(image) => {
                    submission.image = image;
                    api.create_post(&submission).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    set_message.set(Some("Post created successfully!".to_string()));
                    run_later(
                        move || navigate("/posts", Default::default()),
                        |callback| set_timeout_with_handle(callback, REDIRECT_DELAY).is_ok(),
                    );
                }
                Err(e) => set_message.set(Some(format!("Error: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="page create-page">
            <h2>"Create a New Post"</h2>
            {move || message.get().map(|m| view! {
                <div class="alert alert-info">{m}</div>
            })}
            <Show
                when=move || session.is_authenticated()
                fallback=|| view! {
                    <p class="page-description">
                        "Please " <a href="/login">"login"</a> " to create a post."
                    </p>
                }
            >
                <form class="create-form" on:submit=do_submit.clone()>
                    {DraftField::ALL
                        .into_iter()
                        .map(|field| view! { <DraftInput draft=draft field=field /> })
                        .collect_view()}

                    <div class="form-group">
                        <label for="draft-image">"Image"</label>
                        <input id="draft-image" type="file" accept="image/*" class="input" node_ref=file_ref />
                    </div>

                    <div class="form-group">
                        <label>"Tags"</label>
                        <TagPicker lookup=lookup />
                    </div>

                    <button type="submit" class="btn btn-success" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Creating..." } else { "Create Post" }}
                    </button>
                </form>
            </Show>
        </div>
    }
}
