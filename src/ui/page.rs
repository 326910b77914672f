use std::sync::Mutex;

use super::lock;

/// Where a click landed: the id of the clicked element followed by the ids of
/// its ancestors. An empty path is a click on the bare page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    path: Vec<String>,
}

impl ClickTarget {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// A click on the page background
    pub fn page() -> Self {
        Self::default()
    }

    /// Whether the click happened on `element_id` or anything inside it
    pub fn is_within(&self, element_id: &str) -> bool {
        self.path.iter().any(|id| id == element_id)
    }
}

type ClickListener = Box<dyn Fn(&ClickTarget) + Send + Sync>;

/// The page every widget lives on.
///
/// Holds page-wide click listeners, which stay registered for as long as the
/// page exists, and collects the messages of blocking alerts.
#[derive(Default)]
pub struct Page {
    click_listeners: Mutex<Vec<ClickListener>>,
    alerts: Mutex<Vec<String>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page-wide click listener.
    ///
    /// Listeners run synchronously inside [`Page::click`] and must not
    /// register further listeners.
    pub fn on_click(&self, listener: impl Fn(&ClickTarget) + Send + Sync + 'static) {
        lock(&self.click_listeners).push(Box::new(listener));
    }

    /// Dispatches a click to every registered listener
    pub fn click(&self, target: &ClickTarget) {
        for listener in lock(&self.click_listeners).iter() {
            listener(target);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.click_listeners).len()
    }

    /// Shows a blocking alert
    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(message = %message, "Alert shown");
        lock(&self.alerts).push(message);
    }

    /// Every alert shown so far, oldest first
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}
