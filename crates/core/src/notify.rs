//! Modal/toast sequencing.
//!
//! Modals (alerts and confirms) go through a FIFO: at most one is active, and
//! after it is dismissed the next one is promoted once the settle delay has
//! passed. Toasts bypass the FIFO and expire on their own. Time is always
//! passed in, so the queue itself never sleeps.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pause between dismissing a modal and showing the next one.
pub const SETTLE_DELAY_MS: i64 = 300;

/// How long a toast stays up unless a request says otherwise.
pub const DEFAULT_TOAST_MS: i64 = 3_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotifyError {
    #[error("notification {0} is not active")]
    NotActive(NotificationId),

    #[error("notification {id} has no button {index}")]
    UnknownButton { id: NotificationId, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    Modal,
    Toast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRole {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationButton {
    pub label: String,
    pub role: ButtonRole,
}

impl NotificationButton {
    #[must_use]
    pub fn confirm(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Confirm,
        }
    }

    #[must_use]
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Cancel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: Option<String>,
    pub message: String,
    pub kind: NotificationKind,
    pub mode: NotificationMode,
    pub buttons: Vec<NotificationButton>,
    pub duration: Duration,
}

impl NotificationRequest {
    /// Modal with a single "OK" button.
    #[must_use]
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            kind: NotificationKind::Info,
            mode: NotificationMode::Modal,
            buttons: vec![NotificationButton::confirm("OK")],
            duration: Duration::zero(),
        }
    }

    /// Modal with "Cancel" and "OK"; resolves `true` only for "OK".
    #[must_use]
    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            buttons: vec![
                NotificationButton::cancel("Cancel"),
                NotificationButton::confirm("OK"),
            ],
            ..Self::alert(message)
        }
    }

    #[must_use]
    pub fn toast(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: None,
            message: message.into(),
            kind,
            mode: NotificationMode::Toast,
            buttons: Vec::new(),
            duration: Duration::milliseconds(DEFAULT_TOAST_MS),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<NotificationButton>) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.mode == NotificationMode::Modal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a notification left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Button(usize),
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub id: NotificationId,
    pub confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub request: NotificationRequest,
    pub shown_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Changes made by [`NotificationQueue::poll`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub promoted: Option<NotificationId>,
    pub expired_toasts: Vec<Resolution>,
}

impl PollOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promoted.is_none() && self.expired_toasts.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    next_id: u64,
    active: Option<Notification>,
    pending: VecDeque<Notification>,
    toasts: Vec<Notification>,
    settle_until: Option<DateTime<Utc>>,
    settle_delay: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settle_delay(Duration::milliseconds(SETTLE_DELAY_MS))
    }

    #[must_use]
    pub fn with_settle_delay(settle_delay: Duration) -> Self {
        Self {
            next_id: 1,
            active: None,
            pending: VecDeque::new(),
            toasts: Vec::new(),
            settle_until: None,
            settle_delay,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&Notification> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn toasts(&self) -> &[Notification] {
        &self.toasts
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.pending.is_empty() && self.toasts.is_empty()
    }

    /// Earliest instant at which `poll` has something to do, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        let settle = if self.active.is_none() && !self.pending.is_empty() {
            self.settle_until
        } else {
            None
        };
        self.toasts
            .iter()
            .filter_map(|t| t.expires_at)
            .chain(settle)
            .min()
    }

    /// Accept a request. Never blocks: modals either become active now or wait.
    pub fn enqueue(&mut self, request: NotificationRequest, now: DateTime<Utc>) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let mut notification = Notification {
            id,
            request,
            shown_at: None,
            expires_at: None,
        };

        if !notification.request.is_modal() {
            notification.shown_at = Some(now);
            notification.expires_at = Some(now + notification.request.duration);
            self.toasts.push(notification);
            return id;
        }

        if self.active.is_none() && self.pending.is_empty() && self.settled(now) {
            notification.shown_at = Some(now);
            self.settle_until = None;
            self.active = Some(notification);
        } else {
            self.pending.push_back(notification);
        }
        id
    }

    /// Dismiss the active modal or a visible toast.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::NotActive` if `id` is neither the active modal nor a
    /// visible toast, and `NotifyError::UnknownButton` for a bad button index.
    pub fn dismiss(
        &mut self,
        id: NotificationId,
        how: Dismissal,
        now: DateTime<Utc>,
    ) -> Result<Resolution, NotifyError> {
        if let Some(pos) = self.toasts.iter().position(|t| t.id == id) {
            self.toasts.remove(pos);
            return Ok(Resolution {
                id,
                confirmed: true,
            });
        }

        let active = match self.active.as_ref() {
            Some(active) if active.id == id => active,
            _ => return Err(NotifyError::NotActive(id)),
        };

        let confirmed = match how {
            Dismissal::Button(index) => {
                let button = active
                    .request
                    .buttons
                    .get(index)
                    .ok_or(NotifyError::UnknownButton { id, index })?;
                button.role == ButtonRole::Confirm
            }
            Dismissal::Backdrop | Dismissal::Escape => false,
        };

        self.active = None;
        self.settle_until = Some(now + self.settle_delay);
        Ok(Resolution { id, confirmed })
    }

    /// Expire toasts and promote the next modal once the settle delay passed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.toasts)
            .into_iter()
            .partition(|t| t.expires_at.is_some_and(|at| at <= now));
        self.toasts = kept;
        outcome.expired_toasts = expired
            .into_iter()
            .map(|t| Resolution {
                id: t.id,
                confirmed: true,
            })
            .collect();

        if self.active.is_none() && self.settled(now) {
            if let Some(mut next) = self.pending.pop_front() {
                next.shown_at = Some(now);
                outcome.promoted = Some(next.id);
                self.active = Some(next);
            }
            self.settle_until = None;
        }

        outcome
    }

    /// Remove everything, returning the ids that never resolved.
    pub fn drain(&mut self) -> Vec<NotificationId> {
        let mut ids: Vec<NotificationId> = self.active.take().map(|n| n.id).into_iter().collect();
        ids.extend(self.pending.drain(..).map(|n| n.id));
        ids.extend(self.toasts.drain(..).map(|n| n.id));
        self.settle_until = None;
        ids
    }

    fn settled(&self, now: DateTime<Utc>) -> bool {
        self.settle_until.is_none_or(|until| now >= until)
    }
}
