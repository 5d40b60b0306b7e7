mod notifier;

pub use notifier::{
    INotifier, InMemoryNotifier, LogNotifier, Notification, NotificationKind, WebhookNotifier,
};
