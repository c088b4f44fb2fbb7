use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: Uuid,
    pub city: String,
    pub complement: Option<String>,
    pub country: String,
    pub neighborhood: String,
    pub number: String,
    pub state: String,
    pub street: String,
    pub zip_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            format!("{}, {}", self.street, self.number),
            self.neighborhood.clone(),
            format!("{} - {}", self.city, self.state),
            self.zip_code.clone(),
            self.country.clone(),
        ];
        let rendered: Vec<&str> = parts
            .iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        f.write_str(&rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            id: Uuid::new_v4(),
            city: "São Paulo".to_string(),
            complement: None,
            country: "Brasil".to_string(),
            neighborhood: "Canindé".to_string(),
            number: "1333".to_string(),
            state: "SP".to_string(),
            street: "Rua Pedro Vicente".to_string(),
            zip_code: "01109-010".to_string(),
        }
    }

    #[test]
    fn test_display_full_address() {
        assert_eq!(
            address().to_string(),
            "Rua Pedro Vicente, 1333, Canindé, São Paulo - SP, 01109-010, Brasil"
        );
    }

    #[test]
    fn test_display_skips_empty_parts() {
        let mut address = address();
        address.neighborhood.clear();
        address.zip_code.clear();
        assert_eq!(
            address.to_string(),
            "Rua Pedro Vicente, 1333, São Paulo - SP, Brasil"
        );
    }
}
