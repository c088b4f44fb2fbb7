//! Typed column values bound into admin queries, plus the form checks shared by every
//! resource.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{EnrollmentStatus, EventStatus, OrderStatus, PaymentStatus, TicketStatus};
use crate::utils::error::AppError;

/// Longest value accepted by the `varchar(255)` columns.
pub const MAX_TEXT_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    SmallInt(Option<i16>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Bool(bool),
    Uuid(Option<Uuid>),
    Date(Option<NaiveDate>),
    Timestamp(Option<NaiveDateTime>),
    Decimal(Option<Decimal>),
    EventStatus(EventStatus),
    EnrollmentStatus(EnrollmentStatus),
    OrderStatus(OrderStatus),
    PaymentStatus(PaymentStatus),
    TicketStatus(TicketStatus),
}

impl FieldValue {
    pub fn push_bind(self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            FieldValue::Text(v) => qb.push_bind(v),
            FieldValue::SmallInt(v) => qb.push_bind(v),
            FieldValue::Int(v) => qb.push_bind(v),
            FieldValue::BigInt(v) => qb.push_bind(v),
            FieldValue::Bool(v) => qb.push_bind(v),
            FieldValue::Uuid(v) => qb.push_bind(v),
            FieldValue::Date(v) => qb.push_bind(v),
            FieldValue::Timestamp(v) => qb.push_bind(v),
            FieldValue::Decimal(v) => qb.push_bind(v),
            FieldValue::EventStatus(v) => qb.push_bind(v),
            FieldValue::EnrollmentStatus(v) => qb.push_bind(v),
            FieldValue::OrderStatus(v) => qb.push_bind(v),
            FieldValue::PaymentStatus(v) => qb.push_bind(v),
            FieldValue::TicketStatus(v) => qb.push_bind(v),
        };
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(Some(v))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        FieldValue::Text(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(Some(v))
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::BigInt(Some(v))
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(v: Option<i64>) -> Self {
        FieldValue::BigInt(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(Some(v))
    }
}

impl From<Option<Uuid>> for FieldValue {
    fn from(v: Option<Uuid>) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(Some(v))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(v: Option<NaiveDate>) -> Self {
        FieldValue::Date(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::Timestamp(Some(v))
    }
}

impl From<Option<NaiveDateTime>> for FieldValue {
    fn from(v: Option<NaiveDateTime>) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(Some(v))
    }
}

impl From<EventStatus> for FieldValue {
    fn from(v: EventStatus) -> Self {
        FieldValue::EventStatus(v)
    }
}

impl From<EnrollmentStatus> for FieldValue {
    fn from(v: EnrollmentStatus) -> Self {
        FieldValue::EnrollmentStatus(v)
    }
}

impl From<OrderStatus> for FieldValue {
    fn from(v: OrderStatus) -> Self {
        FieldValue::OrderStatus(v)
    }
}

impl From<PaymentStatus> for FieldValue {
    fn from(v: PaymentStatus) -> Self {
        FieldValue::PaymentStatus(v)
    }
}

impl From<TicketStatus> for FieldValue {
    fn from(v: TicketStatus) -> Self {
        FieldValue::TicketStatus(v)
    }
}

/// Column assignments produced by a submitted form, in column order.
pub type Assignments = Vec<(&'static str, FieldValue)>;

/// Accumulates form errors so the operator sees all of them at once.
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{} is required", field));
        }
        self.max_length(field, value)
    }

    pub fn max_length(&mut self, field: &str, value: &str) -> &mut Self {
        if value.chars().count() > MAX_TEXT_LENGTH {
            self.errors.push(format!(
                "{} must be at most {} characters",
                field, MAX_TEXT_LENGTH
            ));
        }
        self
    }

    pub fn optional(&mut self, field: &str, value: &Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.max_length(field, value);
        }
        self
    }

    pub fn non_negative<T>(&mut self, field: &str, value: T) -> &mut Self
    where
        T: PartialOrd + Default,
    {
        if value < T::default() {
            self.errors.push(format!("{} must not be negative", field));
        }
        self
    }

    pub fn check(&mut self, condition: bool, message: &str) -> &mut Self {
        if !condition {
            self.errors.push(message.to_string());
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.errors.join("; ")))
        }
    }
}
