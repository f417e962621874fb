//! Deferred image loader instances.
//!
//! A mounted loader shows its placeholder until the element nears the
//! viewport, then fetches the target once and swaps it in.
//!
//! ```text
//! Idle ──(entry.triggers)──► Fetching ──(decode ok)──────────► Loaded
//!   │                           │
//!   │                           └─(max_retries + 1 failures)──► Failed
//!   └─ unmount: guard dropped, callback disarmed, task aborted
//! ```
//!
//! Each instance is one tokio task. Unmount happens on the caller's turn:
//! the observer registration and the callback slot are cleared under their
//! locks before the task is aborted, so nothing fires afterwards.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::observer::{IntersectionEntry, ObserverGuard, ObserverOptions, Rect, Viewport};
use super::request::{ImageRequest, LoadState};
use super::source::ImageSource;
use crate::config::LazyConfig;
use crate::debug;

type OnLoad = Box<dyn FnOnce(&ImageRequest) + Send>;

/// Observation and retry settings shared by a page's loaders.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderOptions {
    pub observer: ObserverOptions,
    /// Placeholder for requests that name none.
    pub placeholder: Option<String>,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::from_config(&LazyConfig::default())
    }
}

impl LoaderOptions {
    /// `root_margin` is checked by config validation; an unparsable value
    /// falls back to the default margin.
    pub fn from_config(config: &LazyConfig) -> Self {
        Self {
            observer: ObserverOptions {
                root_margin: config.root_margin.parse().unwrap_or_default(),
                threshold: config.threshold,
            },
            placeholder: Some(config.placeholder.clone()).filter(|p| !p.is_empty()),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    #[inline]
    fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// An unmounted loader.
pub struct LazyImage {
    request: ImageRequest,
    options: LoaderOptions,
    on_load: Option<OnLoad>,
}

impl LazyImage {
    pub fn new(request: ImageRequest) -> Self {
        Self {
            request,
            options: LoaderOptions::default(),
            on_load: None,
        }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Called once, after the target has decoded.
    pub fn on_load(mut self, callback: impl FnOnce(&ImageRequest) + Send + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Place the element at `rect` and start observing it.
    ///
    /// Must be called within a tokio runtime. An empty target URL stays
    /// `Idle` and registers nothing.
    pub fn mount<S: ImageSource>(
        self,
        viewport: &Viewport,
        rect: Rect,
        source: Arc<S>,
    ) -> MountedImage {
        let mut request = self.request;
        if request.placeholder_url.is_none() {
            request.placeholder_url = self.options.placeholder.clone();
        }
        let request = Arc::new(request);
        let (state_tx, state_rx) = watch::channel(LoadState::Idle);

        if request.target_url.is_empty() {
            return MountedImage {
                request,
                state: state_rx,
                shared: Arc::new(Shared::default()),
                task: None,
            };
        }

        let (guard, entries) = viewport.observe(rect, self.options.observer).into_parts();
        let shared = Arc::new(Shared {
            guard: Mutex::new(Some(guard)),
            on_load: Mutex::new(self.on_load),
            ..Default::default()
        });

        let task = tokio::spawn(run(
            Arc::clone(&request),
            self.options,
            entries,
            Arc::clone(&shared),
            state_tx,
            source,
        ));

        MountedImage {
            request,
            state: state_rx,
            shared,
            task: Some(task),
        }
    }
}

#[derive(Default)]
struct Shared {
    guard: Mutex<Option<ObserverGuard>>,
    /// Held while the callback runs and while unmounting. Reentrant so a
    /// callback may drop its own loader.
    firing: ReentrantMutex<()>,
    on_load: Mutex<Option<OnLoad>>,
    /// Last decode error, set on `Failed`.
    error: Mutex<Option<String>>,
}

/// A live loader. Dropping it unmounts.
pub struct MountedImage {
    request: Arc<ImageRequest>,
    state: watch::Receiver<LoadState>,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl MountedImage {
    pub fn request(&self) -> &ImageRequest {
        &self.request
    }

    pub fn state(&self) -> LoadState {
        *self.state.borrow()
    }

    /// Current `<img>` markup.
    pub fn render(&self) -> String {
        self.request.render(self.state())
    }

    /// Why the load failed, once `Failed`.
    pub fn error(&self) -> Option<String> {
        self.shared.error.lock().clone()
    }

    /// Receiver for state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.clone()
    }

    /// Wait until `Loaded` or `Failed`. Returns the current state instead
    /// once no further transition can happen (empty target).
    pub async fn settled(&mut self) -> LoadState {
        let result = self
            .state
            .wait_for(|state| state.is_settled())
            .await
            .map(|state| *state);
        result.unwrap_or_else(|_| *self.state.borrow())
    }

    pub fn unmount(self) {}
}

impl Drop for MountedImage {
    fn drop(&mut self) {
        // Disarm first: waits out a callback running on another thread.
        {
            let _firing = self.shared.firing.lock();
            self.shared.on_load.lock().take();
        }
        self.shared.guard.lock().take();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run<S: ImageSource>(
    request: Arc<ImageRequest>,
    options: LoaderOptions,
    mut entries: mpsc::UnboundedReceiver<IntersectionEntry>,
    shared: Arc<Shared>,
    state: watch::Sender<LoadState>,
    source: Arc<S>,
) {
    loop {
        match entries.recv().await {
            Some(entry) if entry.triggers(options.observer.threshold) => break,
            Some(_) => {}
            None => return,
        }
    }

    // Disconnect before fetching: at most one fetch sequence per instance.
    shared.guard.lock().take();
    drop(entries);
    state.send_replace(LoadState::Fetching);

    let url = request.target_url.as_str();
    let attempts = options.attempts();
    for attempt in 1..=attempts {
        match source.decode(url).await {
            Ok(image) => {
                debug!("lazy"; "loaded {} ({}x{})", url, image.width, image.height);
                finish_loaded(&request, &shared, &state);
                return;
            }
            Err(e) if attempt < attempts => {
                debug!("lazy"; "attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                tokio::time::sleep(options.retry_delay).await;
            }
            Err(e) => {
                debug!("lazy"; "giving up on {} after {} attempts: {}", url, attempts, e);
                *shared.error.lock() = Some(e.to_string());
            }
        }
    }

    shared.on_load.lock().take();
    state.send_replace(LoadState::Failed);
}

/// Swap to `Loaded` and fire the callback unless unmount disarmed it.
fn finish_loaded(request: &ImageRequest, shared: &Shared, state: &watch::Sender<LoadState>) {
    let _firing = shared.firing.lock();
    let callback = shared.on_load.lock().take();
    state.send_replace(LoadState::Loaded);
    if let Some(callback) = callback {
        callback(request);
    }
}
