use super::notify_next_on_waitlist::NotifyNextOnWaitlistUseCase;
use crate::shared::{notify::dispatch, usecase::Subscriber};
use serde_json::json;
use studio_booking_domain::WaitlistEntry;
use studio_booking_infra::{Notification, NotificationKind, StudioContext};

pub struct NotifyWaitlistEntryOnSpotAvailable;

#[async_trait::async_trait(?Send)]
impl Subscriber<NotifyNextOnWaitlistUseCase> for NotifyWaitlistEntryOnSpotAvailable {
    async fn notify(&self, entry: &WaitlistEntry, ctx: &StudioContext) {
        let notification = Notification {
            recipient: entry.email.clone(),
            kind: NotificationKind::WaitlistSpotAvailable,
            payload: json!({
                "entryId": entry.id,
                "eventId": entry.event_id,
                "name": entry.name,
                "position": entry.position,
            }),
        };
        dispatch(notification, ctx).await;
    }
}
