use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use super::status::EventStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub init_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: EventStatus,
    pub address_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    /// One-to-one link to the cover image.
    pub event_thumbnail_id: Option<Uuid>,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Free-form setting scoped to one event, keyed by `(event_id, key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventConfiguration {
    pub event_id: Uuid,
    pub key: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventThumbnail {
    pub id: Uuid,
    pub uploaded_at: NaiveDateTime,
    pub filename: String,
}

impl fmt::Display for EventThumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}
