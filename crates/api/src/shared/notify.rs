use studio_booking_infra::{Notification, StudioContext};
use tracing::error;

/// Hands the notification to the notifier. Failures are logged and never
/// reach the caller.
pub async fn dispatch(notification: Notification, ctx: &StudioContext) {
    let kind = notification.kind;
    if let Err(e) = ctx.notifier.notify(notification).await {
        error!("Unable to dispatch {:?} notification: {:?}", kind, e);
    }
}
