use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::HttpBackend;
use crate::config::ClientConfig;
use crate::lookup::{BrowserTimer, Debouncer, LookupPhase, TagLookup};

/// Multi-select typeahead over the tag knowledge base.
///
/// Typing re-arms the lookup timer; only the last keystroke of a burst
/// queries the server. Picked tags are kept in `lookup` for the form.
#[component]
pub fn TagPicker(
    /// Shared candidate/selection state, read by the enclosing form on submit.
    lookup: TagLookup,
    /// Placeholder text for the search input.
    #[prop(default = "Search and add tags")]
    placeholder: &'static str,
) -> impl IntoView {
    let api = expect_context::<HttpBackend>();
    let config = expect_context::<ClientConfig>();

    let (search_text, set_search_text) = signal(String::new());
    let debouncer = StoredValue::new_local(Debouncer::new(BrowserTimer, config.lookup_delay));

    let on_input_change = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        set_search_text.set(text.clone());

        let api = api.clone();
        debouncer.update_value(|d| {
            lookup.input(d, &text, move |ticket| {
                spawn_local(async move {
                    lookup.run_query(&api, ticket).await;
                });
            });
        });
    };

    let on_remove = move |value: String| {
        lookup.deselect(&value);
    };

    view! {
        <div class="tag-picker">
            <div class="tp-selected">
                {move || {
                    lookup.selected().get().into_iter().map(|opt| {
                        let value = opt.value.clone();
                        view! {
                            <span class="tp-chip">
                                {opt.value}
                                <button
                                    type="button"
                                    class="tp-chip-remove"
                                    title="Remove tag"
                                    on:click=move |_| on_remove(value.clone())
                                >
                                    "\u{2715}"
                                </button>
                            </span>
                        }
                    }).collect_view()
                }}
            </div>

            <input
                type="text"
                class="tp-search input"
                placeholder=placeholder
                prop:value=move || search_text.get()
                on:input=on_input_change
            />

            {move || match lookup.phase().get() {
                LookupPhase::Idle => view! { <div style="display:none"></div> }.into_any(),
                LookupPhase::Pending => view! {
                    <div class="tp-dropdown">
                        <div class="tp-status">"Searching..."</div>
                    </div>
                }.into_any(),
                LookupPhase::Populated => {
                    let candidates = lookup.candidates().get();
                    if candidates.is_empty() {
                        return view! {
                            <div class="tp-dropdown">
                                <div class="tp-empty">"No tags found"</div>
                            </div>
                        }.into_any();
                    }

                    let selected = lookup.selected().get();
                    let option_views: Vec<_> = candidates.into_iter().map(|opt| {
                        let is_selected = selected.iter().any(|s| s.value == opt.value);
                        let option_class = if is_selected { "tp-option selected" } else { "tp-option" };
                        let label = opt.label.clone();
                        view! {
                            <div
                                class={option_class}
                                on:mousedown=move |_| lookup.select(opt.clone())
                            >
                                {label}
                            </div>
                        }
                    }).collect();

                    view! {
                        <div class="tp-dropdown">
                            <div class="tp-options">{option_views}</div>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
