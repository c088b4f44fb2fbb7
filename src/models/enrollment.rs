use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::EnrollmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub birth_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub document: String,
    pub email: String,
    pub name: String,
    pub status: EnrollmentStatus,
}
