use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(skip)]
    pub password_date: Option<NaiveDate>,
    pub role_id: i32,
    pub company_id: Option<Uuid>,
    pub document: String,
    #[serde(skip)]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ana".to_string(),
            name: "Ana".to_string(),
            bio: None,
            email: Some("ana@example.com".to_string()),
            birth_date: None,
            password_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            role_id: 1,
            company_id: None,
            document: "12345678900".to_string(),
            password: Some("$2a$10$hash".to_string()),
            phone: None,
            active: true,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_date").is_none());
        assert_eq!(json["username"], "ana");
        assert_eq!(user.to_string(), "Ana");
    }
}
