use std::time::Duration;

use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::Backend;
use crate::models::TagCandidate;

/// A one-shot timer whose pending callbacks can be cancelled by handle.
pub trait Timer {
    type Handle;

    /// Schedule `callback` after `delay`. `None` if the timer could not be
    /// armed.
    fn start(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    fn cancel(&self, handle: Self::Handle);
}

/// `window.setTimeout` / `window.clearTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

/// An armed browser timeout. Owns its JS closure, so dropping the handle
/// (after firing or on cancel) frees it.
pub struct TimeoutHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timer for BrowserTimer {
    type Handle = TimeoutHandle;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        let window = web_sys::window()?;
        let closure = Closure::once(move || callback());
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay.as_millis().min(i32::MAX as u128) as i32,
            )
            .ok()?;
        Some(TimeoutHandle {
            id,
            _closure: closure,
        })
    }

    fn cancel(&self, handle: TimeoutHandle) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle.id);
        }
    }
}

/// Holds at most one armed timer; arming a new one cancels the previous.
pub struct Debouncer<T: Timer> {
    timer: T,
    delay: Duration,
    pending: Option<T::Handle>,
}

impl<T: Timer> Debouncer<T> {
    pub fn new(timer: T, delay: Duration) -> Self {
        Self {
            timer,
            delay,
            pending: None,
        }
    }

    pub fn restart(&mut self, callback: impl FnOnce() + 'static) {
        self.cancel();
        self.pending = self.timer.start(self.delay, Box::new(callback));
        if self.pending.is_none() {
            warn!("Could not arm lookup timer");
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }
}

impl<T: Timer> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Pending,
    Populated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOption {
    pub value: String,
    pub label: String,
}

impl From<TagCandidate> for SearchOption {
    fn from(tag: TagCandidate) -> Self {
        let description = tag.description.as_deref().unwrap_or("No description");
        Self {
            label: format!("{} - {}", tag.label, description),
            value: tag.label,
        }
    }
}

/// A query whose quiet period elapsed. Stale once any newer input arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    stamp: u64,
    pub query: String,
}

/// Candidate list and selection of the tag typeahead.
#[derive(Debug, Clone, Copy)]
pub struct TagLookup {
    phase: RwSignal<LookupPhase>,
    candidates: RwSignal<Vec<SearchOption>>,
    selected: RwSignal<Vec<SearchOption>>,
    generation: StoredValue<u64>,
}

impl TagLookup {
    pub fn new() -> Self {
        Self {
            phase: RwSignal::new(LookupPhase::Idle),
            candidates: RwSignal::new(Vec::new()),
            selected: RwSignal::new(Vec::new()),
            generation: StoredValue::new(0),
        }
    }

    pub fn phase(&self) -> Signal<LookupPhase> {
        self.phase.into()
    }

    pub fn candidates(&self) -> Signal<Vec<SearchOption>> {
        self.candidates.into()
    }

    pub fn selected(&self) -> Signal<Vec<SearchOption>> {
        self.selected.into()
    }

    fn bump(&self) -> Option<u64> {
        self.generation.try_update_value(|g| {
            *g += 1;
            *g
        })
    }

    fn is_current(&self, stamp: u64) -> bool {
        self.generation.try_get_value() == Some(stamp)
    }

    /// Feed one keystroke. Blank input clears the candidates right away;
    /// anything else re-arms the timer, and `on_quiet` receives the ticket
    /// once no further input arrived within the delay.
    pub fn input<T: Timer>(
        self,
        debouncer: &mut Debouncer<T>,
        text: &str,
        on_quiet: impl FnOnce(LookupTicket) + 'static,
    ) {
        let Some(stamp) = self.bump() else {
            return;
        };

        if text.trim().is_empty() {
            debouncer.cancel();
            self.candidates.set(Vec::new());
            self.phase.set(LookupPhase::Idle);
            return;
        }

        self.phase.set(LookupPhase::Pending);
        let ticket = LookupTicket {
            stamp,
            query: text.to_string(),
        };
        debouncer.restart(move || on_quiet(ticket));
    }

    /// Run the query for a ticket. Returns whether the result was applied;
    /// superseded tickets issue no request and late answers are dropped.
    pub async fn run_query<B: Backend + ?Sized>(self, api: &B, ticket: LookupTicket) -> bool {
        if !self.is_current(ticket.stamp) {
            return false;
        }

        let result = api.search_tags(&ticket.query).await;
        if !self.is_current(ticket.stamp) {
            return false;
        }

        match result {
            Ok(tags) => {
                self.candidates
                    .set(tags.into_iter().map(SearchOption::from).collect());
                self.phase.set(LookupPhase::Populated);
            }
            Err(e) => {
                warn!("Tag search for '{}' failed: {}", ticket.query, e);
                self.candidates.set(Vec::new());
                self.phase.set(LookupPhase::Idle);
            }
        }
        true
    }

    pub fn select(&self, option: SearchOption) {
        self.selected.update(|selected| {
            if !selected.iter().any(|o| o.value == option.value) {
                selected.push(option);
            }
        });
    }

    pub fn deselect(&self, value: &str) {
        self.selected.update(|selected| selected.retain(|o| o.value != value));
    }

    /// Values to submit, one `tags` field each.
    pub fn tag_values(&self) -> Vec<String> {
        self.selected
            .with_untracked(|selected| selected.iter().map(|o| o.value.clone()).collect())
    }
}

impl Default for TagLookup {
    fn default() -> Self {
        Self::new()
    }
}
