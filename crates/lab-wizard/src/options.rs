//! Reference-data options a step loads when it is mounted.
//!
//! Each step keeps its options in local [`OptionSlot`]s, never in the draft.
//! A slot is `Loading` until its single fetch settles; a failed fetch leaves
//! an empty option list plus a banner message and never blocks the form.
//!
//! Fetches hold only a weak reference to the slot. When the step is dropped
//! (the user navigated away) a late response has nowhere to land and is
//! discarded. Restarting a slot (a new load, `clear`, `apply`) bumps its
//! generation, so a response to an older load is discarded as well.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lab_client::ApiError;
use lab_core::entities::Selectable;
use tokio::task::JoinHandle;

/// Load state of one option list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(OptionIndex<T>),
    Failed(String),
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded records; empty while loading or after a failure.
    #[must_use]
    pub fn options(&self) -> &[T] {
        match self {
            Self::Loaded(index) => index.items(),
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    /// Banner message of a failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}

/// Records of one successful load with an id → record lookup built once.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionIndex<T> {
    items: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T: Selectable> OptionIndex<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let positions = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.key(), i))
            .collect();
        Self { items, positions }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key.trim()).map(|&i| &self.items[i])
    }

    /// Display label for `key`, if it is a known option.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<String> {
        self.get(key).map(Selectable::label)
    }
}

impl<T> OptionIndex<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One rendered select option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    pub label: String,
    /// Set when the option is shown but cannot be picked.
    pub disabled_reason: Option<String>,
}

impl Choice {
    #[must_use]
    pub fn of<T: Selectable>(item: &T) -> Self {
        Self {
            id: item.key(),
            label: item.label(),
            disabled_reason: None,
        }
    }

    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.disabled_reason.is_none()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.disabled_reason {
            Some(reason) => write!(f, "{} (unavailable: {reason})", self.label),
            None => f.write_str(&self.label),
        }
    }
}

/// Step-local option list, shared with at most one in-flight fetch.
#[derive(Debug)]
pub struct OptionSlot<T> {
    what: &'static str,
    shared: Arc<Mutex<Shared<T>>>,
}

/// Slot contents plus the generation of the load allowed to fill them.
#[derive(Debug)]
pub(crate) struct Shared<T> {
    generation: u64,
    state: LoadState<T>,
}

impl<T> Shared<T> {
    /// Back to `Loading`; results of earlier loads no longer apply.
    fn restart(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }
}

impl<T: Selectable + Clone + Send + 'static> OptionSlot<T> {
    /// An empty slot in the `Loading` state. `what` names the options in
    /// log lines and banners ("methods", "batches", ...).
    #[must_use]
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            shared: Arc::new(Mutex::new(Shared {
                generation: 0,
                state: LoadState::Loading,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<T>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the slot's fetch. The slot goes back to `Loading` and the
    /// result is applied when the future settles, unless the slot is gone
    /// or a newer load, `apply` or `clear` has happened since.
    pub fn spawn_load<F>(&self, fetch: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
    {
        let generation = self.lock().restart();
        let weak = Arc::downgrade(&self.shared);
        let what = self.what;
        tokio::spawn(async move {
            let result = fetch.await;
            let Some(shared) = weak.upgrade() else {
                tracing::debug!(what, "options arrived after the step closed; discarded");
                return;
            };
            let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if shared.generation == generation {
                shared.state = settle(what, result);
            } else {
                tracing::debug!(what, generation, "superseded options discarded");
            }
        })
    }

    /// Apply a fetch result directly. Any load still in flight is superseded.
    pub fn apply(&self, result: Result<Vec<T>, ApiError>) {
        let mut shared = self.lock();
        shared.restart();
        shared.state = settle(self.what, result);
    }

    /// Back to `Loading`, dropping loaded options and any load in flight.
    pub fn clear(&self) {
        self.lock().restart();
    }

    #[must_use]
    pub fn state(&self) -> LoadState<T> {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().state.error().map(str::to_string)
    }

    #[must_use]
    pub fn options(&self) -> Vec<T> {
        self.lock().state.options().to_vec()
    }

    /// Look up a loaded option by id.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        match &self.lock().state {
            LoadState::Loaded(index) => index.get(key).cloned(),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        self.lock().state.options().iter().map(Choice::of).collect()
    }

    #[must_use]
    pub const fn what(&self) -> &'static str {
        self.what
    }

    /// Weak handle, for checking whether a fetch could still land.
    #[cfg(test)]
    pub(crate) fn downgrade(&self) -> std::sync::Weak<Mutex<Shared<T>>> {
        Arc::downgrade(&self.shared)
    }
}

fn settle<T: Selectable>(what: &str, result: Result<Vec<T>, ApiError>) -> LoadState<T> {
    match result {
        Ok(items) => {
            tracing::debug!(what, count = items.len(), "options loaded");
            LoadState::Loaded(OptionIndex::new(items))
        }
        Err(error) => {
            tracing::warn!(what, %error, "failed to load options");
            LoadState::Failed(format!("Could not load {what}: {error}"))
        }
    }
}
