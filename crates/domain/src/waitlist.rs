use crate::shared::entity::{Entity, ID};

/// A prospective attendee queued for a sold-out `Event`
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub id: ID,
    pub event_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// 1-based rank within the queue of the event, assigned on insertion
    pub position: i64,
    pub notified_at: Option<i64>,
    pub created: i64,
}

impl Entity for WaitlistEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl WaitlistEntry {
    pub fn new(
        event_id: &ID,
        name: String,
        email: String,
        phone: Option<String>,
        position: i64,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            event_id: event_id.clone(),
            name,
            email,
            phone,
            position,
            notified_at: None,
            created: now,
        }
    }

    /// Position of the next entry appended after the given ones
    pub fn next_position<'a, I>(entries: I) -> i64
    where
        I: IntoIterator<Item = &'a WaitlistEntry>,
    {
        entries.into_iter().map(|e| e.position).max().unwrap_or(0) + 1
    }

    pub fn is_notified(&self) -> bool {
        self.notified_at.is_some()
    }

    pub fn mark_notified(&mut self, now: i64) {
        self.notified_at = Some(now);
    }
}
