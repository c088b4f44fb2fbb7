//! Closed status vocabularies shared with the ticketing backend and the payment provider.
//!
//! The stored literal of every variant is part of an external contract: integer codes for
//! events and orders, upper-case words for enrollments, payments and tickets. Labels are the
//! Portuguese captions shown by the admin console.

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownStatus {
    fn new(kind: &'static str, value: impl fmt::Display) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A closed set of admin choices.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    /// The value as it is stored and sent over the wire, rendered as text.
    fn literal(&self) -> String;

    fn label(&self) -> &'static str;
}

/// Maps a text-typed column onto an enum through its `as_str`/`FromStr` pair.
macro_rules! text_column {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <str as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <str as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, Postgres> for $ty {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let literal = <&str as sqlx::Decode<Postgres>>::decode(value)?;
                Ok(literal.parse::<$ty>()?)
            }
        }

        impl<'q> sqlx::Encode<'q, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
                <&str as sqlx::Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Event lifecycle, stored as an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum EventStatus {
    Scheduled = 1,
    Published = 2,
    #[default]
    Opened = 3,
    InProgress = 4,
    Canceled = 5,
    Finished = 6,
}

impl From<EventStatus> for i32 {
    fn from(status: EventStatus) -> Self {
        status as i32
    }
}

impl TryFrom<i32> for EventStatus {
    type Error = UnknownStatus;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        EventStatus::ALL
            .iter()
            .copied()
            .find(|status| *status as i32 == code)
            .ok_or_else(|| UnknownStatus::new("event status", code))
    }
}

impl Choice for EventStatus {
    const ALL: &'static [Self] = &[
        EventStatus::Scheduled,
        EventStatus::Published,
        EventStatus::Opened,
        EventStatus::InProgress,
        EventStatus::Canceled,
        EventStatus::Finished,
    ];

    fn literal(&self) -> String {
        (*self as i32).to_string()
    }

    fn label(&self) -> &'static str {
        match self {
            EventStatus::Scheduled => "Agendado",
            EventStatus::Published => "Publicado",
            EventStatus::Opened => "Aberto",
            EventStatus::InProgress => "Em andamento",
            EventStatus::Canceled => "Cancelado",
            EventStatus::Finished => "Finalizado",
        }
    }
}

/// Organizer decision on an enrollment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[default]
    #[serde(rename = "WAITING")]
    WaitingConfirmation,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "DENIED")]
    Denied,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::WaitingConfirmation => "WAITING",
            EnrollmentStatus::Confirmed => "CONFIRMED",
            EnrollmentStatus::Denied => "DENIED",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus::new("enrollment status", s))
    }
}

impl Choice for EnrollmentStatus {
    const ALL: &'static [Self] = &[
        EnrollmentStatus::WaitingConfirmation,
        EnrollmentStatus::Confirmed,
        EnrollmentStatus::Denied,
    ];

    fn literal(&self) -> String {
        self.as_str().to_string()
    }

    fn label(&self) -> &'static str {
        match self {
            EnrollmentStatus::WaitingConfirmation => "Aguardando confirmação",
            EnrollmentStatus::Confirmed => "Confirmado",
            EnrollmentStatus::Denied => "Negado",
        }
    }
}

text_column!(EnrollmentStatus);

/// Order lifecycle, stored as a smallint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum OrderStatus {
    Reserved = 10,
    Pending = 11,
    Approved = 20,
    Failed = 21,
    Canceled = 22,
    ForcedCanceled = 23,
}

impl From<OrderStatus> for i16 {
    fn from(status: OrderStatus) -> Self {
        status as i16
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| *status as i16 == code)
            .ok_or_else(|| UnknownStatus::new("order status", code))
    }
}

impl Choice for OrderStatus {
    const ALL: &'static [Self] = &[
        OrderStatus::Reserved,
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Failed,
        OrderStatus::Canceled,
        OrderStatus::ForcedCanceled,
    ];

    fn literal(&self) -> String {
        (*self as i16).to_string()
    }

    fn label(&self) -> &'static str {
        match self {
            OrderStatus::Reserved => "Reservado",
            OrderStatus::Pending => "Pendente",
            OrderStatus::Approved => "Aprovado",
            OrderStatus::Failed => "Recusado",
            OrderStatus::Canceled => "Cancelado",
            OrderStatus::ForcedCanceled => "Cancelado Forçadamente",
        }
    }
}

/// Payment states exactly as the payment provider reports them in webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Approved,
    Pending,
    InProcess,
    InMediation,
    Authorized,
    Rejected,
    Cancelled,
    Refunded,
    ChargedBack,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::InProcess => "IN_PROCESS",
            PaymentStatus::InMediation => "IN_MEDIATION",
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Rejected => "REJECTED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::ChargedBack => "CHARGED_BACK",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus::new("payment status", s))
    }
}

impl Choice for PaymentStatus {
    const ALL: &'static [Self] = &[
        PaymentStatus::Approved,
        PaymentStatus::Pending,
        PaymentStatus::InProcess,
        PaymentStatus::InMediation,
        PaymentStatus::Authorized,
        PaymentStatus::Rejected,
        PaymentStatus::Cancelled,
        PaymentStatus::Refunded,
        PaymentStatus::ChargedBack,
    ];

    fn literal(&self) -> String {
        self.as_str().to_string()
    }

    // The provider vocabulary has no captions of its own.
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

text_column!(PaymentStatus);

/// Ticket lifecycle. Stored by name in a text column; the legacy numeric code is still
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Available,
    Consumed,
    Expired,
    Canceled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Available => "AVAILABLE",
            TicketStatus::Consumed => "CONSUMED",
            TicketStatus::Expired => "EXPIRED",
            TicketStatus::Canceled => "CANCELED",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            TicketStatus::Available => 1,
            TicketStatus::Consumed => 2,
            TicketStatus::Expired => 3,
            TicketStatus::Canceled => 4,
        }
    }
}

impl FromStr for TicketStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s || status.code().to_string() == s)
            .ok_or_else(|| UnknownStatus::new("ticket status", s))
    }
}

impl Choice for TicketStatus {
    const ALL: &'static [Self] = &[
        TicketStatus::Available,
        TicketStatus::Consumed,
        TicketStatus::Expired,
        TicketStatus::Canceled,
    ];

    fn literal(&self) -> String {
        self.as_str().to_string()
    }

    fn label(&self) -> &'static str {
        match self {
            TicketStatus::Available => "Disponível",
            TicketStatus::Consumed => "Consumido",
            TicketStatus::Expired => "Expirado",
            TicketStatus::Canceled => "Cancelado",
        }
    }
}

text_column!(TicketStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_codes() {
        assert_eq!(i32::from(EventStatus::Scheduled), 1);
        assert_eq!(i32::from(EventStatus::Finished), 6);
        assert_eq!(EventStatus::try_from(4), Ok(EventStatus::InProgress));
        assert!(EventStatus::try_from(0).is_err());
        assert!(EventStatus::try_from(7).is_err());
        assert_eq!(EventStatus::default(), EventStatus::Opened);
    }

    #[test]
    fn test_order_status_codes() {
        let codes: Vec<i16> = OrderStatus::ALL.iter().map(|s| i16::from(*s)).collect();
        assert_eq!(codes, vec![10, 11, 20, 21, 22, 23]);
        assert!(OrderStatus::try_from(12).is_err());
    }

    #[test]
    fn test_enrollment_status_literals() {
        assert_eq!(EnrollmentStatus::default().as_str(), "WAITING");
        assert_eq!(
            "CONFIRMED".parse::<EnrollmentStatus>(),
            Ok(EnrollmentStatus::Confirmed)
        );
        assert!("WAITING_CONFIRMATION".parse::<EnrollmentStatus>().is_err());
        assert!("confirmed".parse::<EnrollmentStatus>().is_err());
    }

    #[test]
    fn test_payment_status_matches_provider_vocabulary() {
        let literals: Vec<&str> = PaymentStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            literals,
            vec![
                "APPROVED",
                "PENDING",
                "IN_PROCESS",
                "IN_MEDIATION",
                "AUTHORIZED",
                "REJECTED",
                "CANCELLED",
                "REFUNDED",
                "CHARGED_BACK",
            ]
        );
        for status in PaymentStatus::ALL {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(*status));
        }
        let err = "CANCELED".parse::<PaymentStatus>().unwrap_err();
        assert_eq!(err.to_string(), "'CANCELED' is not a valid payment status");
    }

    #[test]
    fn test_ticket_status_accepts_name_and_code() {
        assert_eq!("CONSUMED".parse::<TicketStatus>(), Ok(TicketStatus::Consumed));
        assert_eq!("3".parse::<TicketStatus>(), Ok(TicketStatus::Expired));
        assert!("5".parse::<TicketStatus>().is_err());
        assert_eq!(TicketStatus::Canceled.to_string(), "CANCELED");
    }

    #[test]
    fn test_json_uses_stored_literals() {
        assert_eq!(serde_json::to_string(&EventStatus::Published).unwrap(), "2");
        assert_eq!(serde_json::to_string(&OrderStatus::ForcedCanceled).unwrap(), "23");
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::WaitingConfirmation).unwrap(),
            "\"WAITING\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::ChargedBack).unwrap(),
            "\"CHARGED_BACK\""
        );

        let status: OrderStatus = serde_json::from_str("21").unwrap();
        assert_eq!(status, OrderStatus::Failed);
        assert!(serde_json::from_str::<EventStatus>("9").is_err());
        assert!(serde_json::from_str::<PaymentStatus>("\"approved\"").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(EventStatus::InProgress.label(), "Em andamento");
        assert_eq!(OrderStatus::ForcedCanceled.label(), "Cancelado Forçadamente");
        assert_eq!(TicketStatus::Available.label(), "Disponível");
        assert_eq!(EnrollmentStatus::Denied.literal(), "DENIED");
        assert_eq!(EventStatus::Opened.literal(), "3");
    }
}
