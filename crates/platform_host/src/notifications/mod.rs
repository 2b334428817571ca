//! User-visible notification contracts.

mod service;

pub use service::{
    MemoryNotificationService, Notice, NoticeLevel, NotificationFuture,
    NotificationService,
};
