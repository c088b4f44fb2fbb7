use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use super::status::TicketStatus;

/// The sellable offering of an event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketSale {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Entries granted per purchase.
    pub entries: i32,
    pub price: Decimal,
    pub stock: i32,
    pub event_id: Uuid,
}

impl fmt::Display for TicketSale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub expired_in: NaiveDate,
    pub valid_in: NaiveDate,
    pub created_at: NaiveDateTime,
    pub last_time_consumed: Option<NaiveDateTime>,
    pub enrollment_id: Uuid,
    pub event_id: Uuid,
    pub ticket_sale_id: Uuid,
    pub code: String,
    pub description: String,
    pub status: TicketStatus,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
