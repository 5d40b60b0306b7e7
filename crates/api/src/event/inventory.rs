use studio_booking_domain::{Event, SpotAdjustment, ID};
use studio_booking_infra::StudioContext;
use tracing::warn;

/// The only way spot counters change outside of reconciliation. The delta is
/// applied atomically by the repo and a clamped adjustment is logged as an
/// inventory inconsistency without failing the caller.
pub async fn adjust_inventory(
    event_id: &ID,
    tier_id: Option<&ID>,
    delta: i64,
    ctx: &StudioContext,
) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
    let res = ctx.repos.events.adjust_spots(event_id, tier_id, delta).await?;
    if let Some((event, adjustment)) = &res {
        log_inconsistency(event, tier_id, adjustment);
    }
    Ok(res)
}

/// Moves the capacity of a tier-less `Event` together with its counter
pub async fn resize_inventory(
    event_id: &ID,
    capacity: i64,
    ctx: &StudioContext,
) -> anyhow::Result<Option<(Event, SpotAdjustment)>> {
    let res = ctx.repos.events.resize(event_id, capacity).await?;
    if let Some((event, adjustment)) = &res {
        log_inconsistency(event, None, adjustment);
    }
    Ok(res)
}

fn log_inconsistency(event: &Event, tier_id: Option<&ID>, adjustment: &SpotAdjustment) {
    if let Some(inconsistency) = adjustment.inconsistency(&event.id, tier_id) {
        warn!(
            event_id = %inconsistency.event_id,
            tier_id = ?inconsistency.tier_id,
            requested_delta = inconsistency.requested_delta,
            applied_delta = inconsistency.applied_delta,
            available_spots = inconsistency.available_spots,
            "Inventory inconsistency: {}",
            inconsistency
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{insert_event, setup};

    #[actix_web::test]
    async fn clamps_and_keeps_going() {
        let ctx = setup();
        let event = insert_event(&ctx, 3).await;

        let (event, adjustment) = adjust_inventory(&event.id, None, -5, &ctx)
            .await
            .expect("To adjust")
            .expect("To find event");
        assert_eq!(event.available_spots, 0);
        assert!(adjustment.is_clamped());

        let (event, _) = adjust_inventory(&event.id, None, 2, &ctx)
            .await
            .expect("To adjust")
            .expect("To find event");
        assert_eq!(event.available_spots, 2);
    }

    #[actix_web::test]
    async fn unknown_event() {
        let ctx = setup();
        let res = adjust_inventory(&ID::new(), None, 1, &ctx)
            .await
            .expect("To adjust");
        assert!(res.is_none());
    }
}
