//! Notification service contracts and in-memory adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Visual severity of a [`Notice`].
pub enum NoticeLevel {
    /// Confirmation or neutral feedback.
    #[default]
    Info,
    /// Failure feedback rendered with destructive styling.
    Destructive,
}

impl NoticeLevel {
    /// Returns the stable token used in `data-ui-variant` attributes.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A short user-facing message with an optional description line.
pub struct Notice {
    /// Headline text.
    pub title: String,
    /// Optional secondary text.
    pub description: Option<String>,
    /// Severity.
    pub level: NoticeLevel,
}

impl Notice {
    /// Builds an informational notice.
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            level: NoticeLevel::Info,
        }
    }

    /// Builds a destructive notice.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            level: NoticeLevel::Destructive,
        }
    }

    /// Attaches a description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notice.
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every notice it receives.
pub struct MemoryNotificationService {
    sent: Rc<RefCell<Vec<Notice>>>,
}

impl MemoryNotificationService {
    /// Returns the notices dispatched so far, oldest first.
    pub fn sent(&self) -> Vec<Notice> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.sent.borrow_mut().push(notice.clone());
            Ok(())
        })
    }
}
