//! Async front for the modal/toast queue.
//!
//! Callers get a [`NotificationHandle`] that resolves once the entry is
//! dismissed. A UI host subscribes to snapshots, forwards user dismissals and
//! drives [`NotificationCenter::poll`] on an interval. Without an attached
//! host, requests are answered synchronously by a [`BlockingDialog`].

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use quest_core::notify::{
    ButtonRole, Dismissal, Notification, NotificationId, NotificationKind, NotificationQueue,
    NotificationRequest, PollOutcome,
};
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::NotificationError;

/// Synchronous stand-in used while no host surface is attached.
pub trait BlockingDialog: Send + Sync {
    fn show(&self, request: &NotificationRequest) -> bool;
}

/// Logs the request and answers without user input.
///
/// Requests without a cancel button resolve `true`; confirms resolve to
/// `confirm_answer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDialog {
    pub confirm_answer: bool,
}

impl BlockingDialog for LogDialog {
    fn show(&self, request: &NotificationRequest) -> bool {
        let answer = if request
            .buttons
            .iter()
            .any(|b| b.role == ButtonRole::Cancel)
        {
            self.confirm_answer
        } else {
            true
        };
        info!(
            kind = request.kind.as_str(),
            title = request.title.as_deref().unwrap_or(""),
            message = %request.message,
            answer,
            "notification shown without host"
        );
        answer
    }
}

/// Resolves to `true` for a confirming dismissal and `false` otherwise,
/// including when the center goes away first.
#[derive(Debug)]
pub struct NotificationHandle {
    id: Option<NotificationId>,
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Ready(Option<bool>),
    Waiting(oneshot::Receiver<bool>),
}

impl NotificationHandle {
    /// A handle that is already resolved.
    #[must_use]
    pub fn ready(answer: bool) -> Self {
        Self {
            id: None,
            state: HandleState::Ready(Some(answer)),
        }
    }

    fn waiting(id: NotificationId, rx: oneshot::Receiver<bool>) -> Self {
        Self {
            id: Some(id),
            state: HandleState::Waiting(rx),
        }
    }

    /// Queue id, or `None` when the fallback dialog answered.
    #[must_use]
    pub fn id(&self) -> Option<NotificationId> {
        self.id
    }
}

impl Future for NotificationHandle {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        match &mut self.get_mut().state {
            HandleState::Ready(answer) => Poll::Ready(answer.take().unwrap_or(false)),
            HandleState::Waiting(rx) => Pin::new(rx).poll(cx).map(|r| r.unwrap_or(false)),
        }
    }
}

/// What a host needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSnapshot {
    pub active: Option<Notification>,
    pub toasts: Vec<Notification>,
    pub pending: usize,
}

impl NotificationSnapshot {
    fn of(queue: &NotificationQueue) -> Self {
        Self {
            active: queue.active().cloned(),
            toasts: queue.toasts().to_vec(),
            pending: queue.pending_len(),
        }
    }
}

struct Inner {
    queue: NotificationQueue,
    waiters: HashMap<NotificationId, oneshot::Sender<bool>>,
}

impl Inner {
    fn resolve(&mut self, id: NotificationId, answer: bool) {
        if let Some(tx) = self.waiters.remove(&id) {
            // The caller may have stopped waiting.
            let _ = tx.send(answer);
        }
    }
}

#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Mutex<Inner>>,
    clock: Clock,
    snapshot: Arc<watch::Sender<NotificationSnapshot>>,
    host_attached: Arc<AtomicBool>,
    fallback: Arc<dyn BlockingDialog>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_queue(clock, NotificationQueue::new())
    }

    #[must_use]
    pub fn with_queue(clock: Clock, queue: NotificationQueue) -> Self {
        let (snapshot, _) = watch::channel(NotificationSnapshot::of(&queue));
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queue,
                waiters: HashMap::new(),
            })),
            clock,
            snapshot: Arc::new(snapshot),
            host_attached: Arc::new(AtomicBool::new(false)),
            fallback: Arc::new(LogDialog::default()),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn BlockingDialog>) -> Self {
        self.fallback = fallback;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.snapshot.send_replace(NotificationSnapshot::of(&inner.queue));
    }

    pub fn attach_host(&self) {
        self.host_attached.store(true, Ordering::SeqCst);
        debug!("notification host attached");
    }

    /// Stop routing to the host. Entries still queued resolve `false`.
    pub fn detach_host(&self) {
        self.host_attached.store(false, Ordering::SeqCst);
        self.shutdown();
        debug!("notification host detached");
    }

    #[must_use]
    pub fn host_attached(&self) -> bool {
        self.host_attached.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NotificationSnapshot> {
        self.snapshot.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> NotificationSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn notify(&self, request: NotificationRequest) -> NotificationHandle {
        if !self.host_attached() {
            return NotificationHandle::ready(self.fallback.show(&request));
        }

        let mut inner = self.lock();
        let id = inner.queue.enqueue(request, self.clock.now());
        let (tx, rx) = oneshot::channel();
        inner.waiters.insert(id, tx);
        self.publish(&inner);
        debug!(%id, pending = inner.queue.pending_len(), "notification queued");
        NotificationHandle::waiting(id, rx)
    }

    pub fn alert(&self, message: impl Into<String>) -> NotificationHandle {
        self.notify(NotificationRequest::alert(message))
    }

    pub fn confirm(&self, message: impl Into<String>) -> NotificationHandle {
        self.notify(NotificationRequest::confirm(message))
    }

    pub fn toast(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationHandle {
        self.notify(NotificationRequest::toast(message, kind))
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.toast(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationHandle {
        self.toast(message, NotificationKind::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationHandle {
        self.toast(message, NotificationKind::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationHandle {
        self.toast(message, NotificationKind::Info)
    }

    /// # Errors
    ///
    /// Returns `NotificationError::Queue` if `id` is not on screen or the
    /// button index is unknown.
    pub fn dismiss(&self, id: NotificationId, how: Dismissal) -> Result<bool, NotificationError> {
        self.dismiss_at(id, how, self.clock.now())
    }

    /// # Errors
    ///
    /// See [`NotificationCenter::dismiss`].
    pub fn dismiss_at(
        &self,
        id: NotificationId,
        how: Dismissal,
        now: DateTime<Utc>,
    ) -> Result<bool, NotificationError> {
        let mut inner = self.lock();
        let resolution = inner.queue.dismiss(id, how, now)?;
        inner.resolve(id, resolution.confirmed);
        self.publish(&inner);
        Ok(resolution.confirmed)
    }

    pub fn poll(&self) -> PollOutcome {
        self.poll_at(self.clock.now())
    }

    /// Expire toasts and promote the next modal, resolving expired handles.
    pub fn poll_at(&self, now: DateTime<Utc>) -> PollOutcome {
        let mut inner = self.lock();
        let outcome = inner.queue.poll(now);
        for resolution in &outcome.expired_toasts {
            inner.resolve(resolution.id, resolution.confirmed);
        }
        if !outcome.is_empty() {
            self.publish(&inner);
        }
        outcome
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.lock().queue.next_deadline()
    }

    /// Drop everything on screen or queued; open handles resolve `false`.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        let ids = inner.queue.drain();
        if !ids.is_empty() {
            warn!(count = ids.len(), "discarding unresolved notifications");
        }
        for id in ids {
            inner.resolve(id, false);
        }
        self.publish(&inner);
    }
}
