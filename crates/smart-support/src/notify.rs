//! Seams for user feedback and navigation.
//!
//! The page decides *what* to tell the user and *where* to send them; how a
//! toast is drawn or a route is followed belongs to whatever hosts the page.

use std::sync::Arc;

use smol_str::SmolStr;

/// Visual weight of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    /// Informational / success
    #[default]
    Default,
    /// Something went wrong
    Destructive,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Short heading
    pub title: SmolStr,
    /// Body text
    pub description: String,
    /// How loudly to show it
    pub variant: ToastVariant,
}

impl Toast {
    /// Informational toast
    pub fn new(title: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    /// Error toast
    pub fn destructive(title: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            ..Self::new(title, description)
        }
    }
}

/// Shows toasts
pub trait Notifier: Send + Sync {
    /// Display a toast. Fire and forget.
    fn notify(&self, toast: Toast);
}

/// Follows client-side routes
pub trait Navigator: Send + Sync {
    /// Send the user to `route`
    fn navigate(&self, route: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, toast: Toast) {
        self.as_ref().notify(toast)
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, route: &str) {
        self.as_ref().navigate(route)
    }
}

/// Emits toasts as log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, _toast: Toast) {
        #[cfg(feature = "tracing")]
        match _toast.variant {
            ToastVariant::Default => {
                tracing::info!(title = %_toast.title, description = %_toast.description, "toast");
            }
            ToastVariant::Destructive => {
                tracing::warn!(title = %_toast.title, description = %_toast.description, "toast");
            }
        };
    }
}

/// Emits navigations as log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, _route: &str) {
        #[cfg(feature = "tracing")]
        tracing::info!(route = _route, "navigate");
    }
}

/// Prints toasts to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        let marker = match toast.variant {
            ToastVariant::Default => "✔",
            ToastVariant::Destructive => "✘",
        };
        println!("{marker} {}: {}", toast.title, toast.description);
    }
}

/// Prints navigations to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        println!("→ redirecting to {route}");
    }
}
