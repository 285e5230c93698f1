//! Data fetches bound to a view's active lifetime.
//!
//! Each activation spawns a new task and supersedes (aborts) the previous
//! one. Results are tagged with the activation's generation and only the
//! newest generation may publish, so a slow, stale response can never
//! overwrite a newer one.

use crate::error::ClientResult;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// The view is not active
    Idle,
    Loading,
    Ready(T),
    /// The last fetch failed; shown like a pending load
    Unavailable(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(data) => ViewState::Ready(f(data)),
            ViewState::Unavailable(msg) => ViewState::Unavailable(msg),
        }
    }
}

struct Slot<T> {
    generation: u64,
    state: ViewState<T>,
}

pub struct ViewLoader<T> {
    view: &'static str,
    slot: Arc<RwLock<Slot<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T> ViewLoader<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            slot: Arc::new(RwLock::new(Slot {
                generation: 0,
                state: ViewState::Idle,
            })),
            task: None,
        }
    }

    /// Start a fresh fetch, superseding any fetch still in flight
    pub async fn activate<F>(&mut self, fetch: F)
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
    {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let generation = {
            let mut slot = self.slot.write().await;
            slot.generation += 1;
            slot.state = ViewState::Loading;
            slot.generation
        };
        tracing::debug!("Loading {} (request {})", self.view, generation);

        let slot = self.slot.clone();
        let view = self.view;
        self.task = Some(tokio::spawn(async move {
            let outcome = fetch.await;

            let mut slot = slot.write().await;
            if slot.generation != generation {
                tracing::debug!("Dropping stale {} result (request {})", view, generation);
                return;
            }

            slot.state = match outcome {
                Ok(data) => ViewState::Ready(data),
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", view, e);
                    ViewState::Unavailable(e.message().to_string())
                }
            };
        }));
    }

    /// Cancel any fetch in flight and forget loaded data
    pub async fn deactivate(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.state = ViewState::Idle;
    }

    pub async fn state(&self) -> ViewState<T> {
        self.slot.read().await.state.clone()
    }

    /// Whether a fetch has been started and not yet settled
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Wait for the current fetch, if any, to finish.
    ///
    /// Cancel safe: dropping this future leaves the fetch running and
    /// still owned by the loader.
    pub async fn settle(&mut self) {
        let Some(task) = self.task.as_mut() else {
            return;
        };

        let outcome = task.await;
        self.task = None;
        if let Err(e) = outcome {
            if !e.is_cancelled() {
                tracing::error!("{} fetch task failed: {}", self.view, e);
            }
        }
    }
}

impl<T> Drop for ViewLoader<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
