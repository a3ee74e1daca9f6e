//! Shared helper utilities for integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each one pulls this module in with `mod support;` and uses what it needs.
#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use events_core::bootstrap::{self, CoreServices};
use events_core::config::CoreSettings;
use events_core::domain::{Event, EventId, UserId};
use events_core::outbound::memory::InMemoryStore;
use mockable::Clock;

pub const SECRET: &str = "integration-secret-0123456789abcdef";

/// Settings with a test secret and the cheapest bcrypt cost.
pub fn settings() -> CoreSettings {
    CoreSettings {
        jwt_secret: Some(SECRET.to_owned()),
        bcrypt_cost: 4,
        ..CoreSettings::default()
    }
}

pub fn event(id: i64) -> Event {
    Event {
        id: EventId::new(id).expect("event id"),
        owner_id: UserId::new(999).expect("owner id"),
        title: format!("Event {id}"),
        description: "Integration fixture".to_owned(),
        date: "2026-11-01".to_owned(),
        location: "Hall A".to_owned(),
    }
}

/// In-memory services with the given events already present.
pub fn services_with_events(ids: &[i64]) -> (CoreServices, Arc<InMemoryStore>) {
    let (services, store) = bootstrap::in_memory(&settings()).expect("in-memory services");
    for id in ids {
        store.put_event(event(*id));
    }
    (services, store)
}

/// Clock that only moves when told to.
pub struct FixtureClock {
    utc_now: Mutex<DateTime<Utc>>,
}

impl FixtureClock {
    pub fn new() -> Arc<Self> {
        let start = Utc
            .with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(Self {
            utc_now: Mutex::new(start),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.utc_now.lock().expect("clock lock") += by;
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.utc_now.lock().expect("clock lock")
    }
}
