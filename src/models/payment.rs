use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::PaymentStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub amount: Decimal,
    pub approval_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub order_id: i64,
    pub updated_at: NaiveDateTime,
    pub currency: String,
    /// Identifier assigned by the payment provider.
    pub external_id: String,
    pub payment_type: String,
    pub status: PaymentStatus,
}
