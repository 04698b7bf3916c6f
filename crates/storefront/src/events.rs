//! Cross-view cart-updated notifications.
//!
//! A same-process hub: after any persisted cart mutation the store emits a
//! [`CartChange`] so concurrently rendered views (the cart-count badge in
//! the navigation chrome, an open summary panel) can re-read the cart
//! instead of trusting a cached copy. This is the in-process counterpart
//! of the browser's `cartUpdated` event; it is not a network event.

use std::sync::{Mutex, PoisonError};

/// Snapshot of the cart published with each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange {
    /// Total units across all lines (the badge value).
    pub item_count: u64,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Revision the mutation was persisted at.
    pub revision: u64,
}

type Listener = Box<dyn Fn(&CartChange) + Send + Sync>;

/// Subscription hub for cart-updated notifications.
#[derive(Default)]
pub struct CartEvents {
    listeners: Mutex<Vec<Listener>>,
}

impl CartEvents {
    /// Create a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked after every persisted mutation.
    ///
    /// Subscriptions last for the lifetime of the hub; there is no
    /// unsubscribe, matching the page-lifetime listeners it models.
    pub fn subscribe(&self, listener: impl Fn(&CartChange) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    /// Notify all subscribers.
    pub(crate) fn emit(&self, change: &CartChange) {
        for listener in self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            listener(change);
        }
    }
}

impl std::fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("CartEvents").field("listeners", &count).finish()
    }
}
