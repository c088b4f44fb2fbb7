//! Pre-filled rows for the event configuration inline.
//!
//! A brand-new event starts with the keys the ticketing backend expects to find
//! (default-ticket flag, default-ticket id and a 30-day selling window) so the operator
//! does not have to remember them. Editing an existing event shows only what is stored.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::EventConfiguration;

pub const HAS_DEFAULT_TICKET: &str = "HAS_DEFAULT_TICKET";
pub const DEFAULT_TICKET_ID: &str = "DEFAULT_TICKET_ID";
pub const END_SELLING_DATE: &str = "END_SELLING_DATE";
pub const START_SELLING_DATE: &str = "START_SELLING_DATE";

/// Blank rows appended to the configuration inline.
pub const EXTRA_ROWS: usize = 4;
pub const SELLING_WINDOW_DAYS: i64 = 30;
pub const SELLING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRow {
    pub key: String,
    pub value: String,
    /// Whether the row mirrors a stored `event_configurations` record.
    #[serde(default)]
    pub persisted: bool,
}

impl From<&EventConfiguration> for ConfigurationRow {
    fn from(config: &EventConfiguration) -> Self {
        Self {
            key: config.key.clone(),
            value: config.value.clone().unwrap_or_default(),
            persisted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationFormset {
    pub rows: Vec<ConfigurationRow>,
    pub extra: usize,
}

/// The four initial key/value pairs, in display order.
pub fn default_configuration(now: NaiveDateTime) -> [(&'static str, String); 4] {
    let end = now + Duration::days(SELLING_WINDOW_DAYS);
    [
        (HAS_DEFAULT_TICKET, "false".to_string()),
        (DEFAULT_TICKET_ID, String::new()),
        (END_SELLING_DATE, end.format(SELLING_DATE_FORMAT).to_string()),
        (START_SELLING_DATE, now.format(SELLING_DATE_FORMAT).to_string()),
    ]
}

/// Builds the configuration inline: stored rows followed by `extra` blank rows.
///
/// When `is_new` is set, the defaults are written into the leading rows in order. If there
/// are fewer rows than defaults, the surplus defaults are dropped.
pub fn build_configuration_formset(
    is_new: bool,
    persisted: &[EventConfiguration],
    extra: usize,
    now: NaiveDateTime,
) -> ConfigurationFormset {
    let mut rows: Vec<ConfigurationRow> = persisted.iter().map(ConfigurationRow::from).collect();
    rows.extend(std::iter::repeat_with(ConfigurationRow::default).take(extra));

    if is_new {
        for (row, (key, value)) in rows.iter_mut().zip(default_configuration(now)) {
            row.key = key.to_string();
            row.value = value;
        }
        tracing::debug!(rows = rows.len(), "Pre-filled event configuration defaults");
    }

    ConfigurationFormset { rows, extra }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    fn pairs(formset: &ConfigurationFormset) -> Vec<(&str, &str)> {
        formset
            .rows
            .iter()
            .map(|row| (row.key.as_str(), row.value.as_str()))
            .collect()
    }

    #[test]
    fn test_new_event_gets_defaults_in_order() {
        let formset = build_configuration_formset(true, &[], EXTRA_ROWS, now());

        assert_eq!(
            pairs(&formset),
            vec![
                ("HAS_DEFAULT_TICKET", "false"),
                ("DEFAULT_TICKET_ID", ""),
                ("END_SELLING_DATE", "2024-04-14 09:30:05"),
                ("START_SELLING_DATE", "2024-03-15 09:30:05"),
            ]
        );
        assert!(formset.rows.iter().all(|row| !row.persisted));
    }

    #[test]
    fn test_selling_window_is_thirty_days() {
        let formset = build_configuration_formset(true, &[], EXTRA_ROWS, now());
        let parse = |key: &str| {
            let row = formset.rows.iter().find(|row| row.key == key).unwrap();
            NaiveDateTime::parse_from_str(&row.value, SELLING_DATE_FORMAT).unwrap()
        };

        let start = parse(START_SELLING_DATE);
        let end = parse(END_SELLING_DATE);
        assert!(start < end);
        assert_eq!(end - start, Duration::days(30));
    }

    #[test]
    fn test_window_crosses_month_and_year() {
        let now = NaiveDate::from_ymd_opt(2024, 12, 20)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let defaults = default_configuration(now);
        assert_eq!(defaults[2].1, "2025-01-19 23:59:59");
    }

    #[test]
    fn test_existing_event_gets_no_defaults() {
        let event_id = Uuid::new_v4();
        let stored = vec![
            EventConfiguration {
                event_id,
                key: "HAS_DEFAULT_TICKET".to_string(),
                value: Some("true".to_string()),
            },
            EventConfiguration {
                event_id,
                key: "DEFAULT_TICKET_ID".to_string(),
                value: None,
            },
        ];

        let formset = build_configuration_formset(false, &stored, EXTRA_ROWS, now());

        assert_eq!(formset.rows.len(), 2 + EXTRA_ROWS);
        assert_eq!(
            pairs(&formset)[..2],
            [("HAS_DEFAULT_TICKET", "true"), ("DEFAULT_TICKET_ID", "")]
        );
        assert!(formset.rows[..2].iter().all(|row| row.persisted));
        assert!(formset.rows[2..]
            .iter()
            .all(|row| *row == ConfigurationRow::default()));
    }

    #[test]
    fn test_fewer_rows_than_defaults() {
        let formset = build_configuration_formset(true, &[], 2, now());
        assert_eq!(
            pairs(&formset),
            vec![("HAS_DEFAULT_TICKET", "false"), ("DEFAULT_TICKET_ID", "")]
        );

        let empty = build_configuration_formset(true, &[], 0, now());
        assert!(empty.rows.is_empty());
    }

    #[test]
    fn test_more_rows_than_defaults_leaves_rest_blank() {
        let formset = build_configuration_formset(true, &[], 6, now());
        assert_eq!(formset.rows.len(), 6);
        assert_eq!(formset.rows[3].key, START_SELLING_DATE);
        assert_eq!(formset.rows[4], ConfigurationRow::default());
        assert_eq!(formset.rows[5], ConfigurationRow::default());
    }
}
