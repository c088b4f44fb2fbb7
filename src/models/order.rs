use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub birth_date: NaiveDate,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub customer_id: Uuid,
    pub document: String,
    pub email: String,
    pub name: String,
    pub payment_url: Option<String>,
    pub phone_number: String,
}

/// A quantity of one ticket offering within an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub quantity: i32,
    pub order_id: Option<i64>,
    /// References `ticket_sale.id`.
    pub ticket_id: Uuid,
}
