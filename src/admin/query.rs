//! Changelist query strings: search, filters and pagination.
//!
//! Column names only ever come from the static registry in [`ModelAdmin`]; request values
//! are always bound as parameters.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{Postgres, QueryBuilder};
use std::collections::HashMap;

use super::site::ModelAdmin;
use crate::config::MAX_PAGE_SIZE;
use crate::utils::error::AppError;

pub const SEARCH_PARAM: &str = "q";
pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Exact(String),
    Gte(NaiveDateTime),
    Lt(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub lookup: Lookup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeListParams {
    pub search_terms: Vec<String>,
    pub filters: Vec<Filter>,
    pub page: u32,
    pub per_page: u32,
}

impl ChangeListParams {
    pub fn parse(
        admin: &ModelAdmin,
        raw: &HashMap<String, String>,
        default_per_page: u32,
    ) -> Result<Self, AppError> {
        let mut params = Self {
            search_terms: Vec::new(),
            filters: Vec::new(),
            page: 1,
            per_page: default_per_page,
        };

        // Stable order keeps the generated SQL deterministic.
        let mut keys: Vec<&String> = raw.keys().collect();
        keys.sort();

        for key in keys {
            let value = &raw[key];
            match key.as_str() {
                SEARCH_PARAM => {
                    if admin.search_fields.is_empty() {
                        return Err(AppError::ValidationError(format!(
                            "{} does not support search",
                            admin.verbose_name_plural
                        )));
                    }
                    params.search_terms = value.split_whitespace().map(str::to_string).collect();
                }
                PAGE_PARAM => {
                    params.page = parse_positive(PAGE_PARAM, value)?;
                }
                PER_PAGE_PARAM => {
                    params.per_page = parse_positive(PER_PAGE_PARAM, value)?.min(MAX_PAGE_SIZE);
                }
                other => params.filters.push(parse_filter(admin, other, value)?),
            }
        }

        Ok(params)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// Appends the WHERE clause for search terms and filters, if there are any.
    pub fn push_conditions(&self, admin: &ModelAdmin, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut keyword = " WHERE ";

        // Every term has to match at least one search field.
        for term in &self.search_terms {
            qb.push(keyword);
            keyword = " AND ";
            qb.push("(");
            for (i, field) in admin.search_fields.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(format!("CAST({} AS TEXT) ILIKE ", field));
                qb.push_bind(like_pattern(term));
            }
            qb.push(")");
        }

        for filter in &self.filters {
            qb.push(keyword);
            keyword = " AND ";
            match &filter.lookup {
                Lookup::Exact(value) => {
                    qb.push(format!("CAST({} AS TEXT) = ", filter.column));
                    qb.push_bind(value.clone());
                }
                Lookup::Gte(bound) => {
                    qb.push(format!("{} >= ", filter.column));
                    qb.push_bind(*bound);
                }
                Lookup::Lt(bound) => {
                    qb.push(format!("{} < ", filter.column));
                    qb.push_bind(*bound);
                }
            }
        }
    }
}

fn parse_positive(name: &str, value: &str) -> Result<u32, AppError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::ValidationError(format!(
            "{} must be a positive integer",
            name
        ))),
    }
}

fn parse_filter(admin: &ModelAdmin, key: &str, value: &str) -> Result<Filter, AppError> {
    let (name, lookup) = key.split_once("__").unwrap_or((key, "exact"));

    let column = admin.filter_column(name).ok_or_else(|| {
        AppError::ValidationError(format!(
            "Unknown filter '{}' for {}",
            key, admin.verbose_name_plural
        ))
    })?;

    let lookup = match lookup {
        "exact" => Lookup::Exact(value.to_string()),
        "gte" if admin.is_date_filter(column) => Lookup::Gte(parse_bound(key, value)?),
        "lt" if admin.is_date_filter(column) => Lookup::Lt(parse_bound(key, value)?),
        _ => {
            return Err(AppError::ValidationError(format!(
                "Unsupported lookup '{}'",
                key
            )))
        }
    };

    Ok(Filter { column, lookup })
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or the `T`-separated form.
fn parse_bound(key: &str, value: &str) -> Result<NaiveDateTime, AppError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_time(chrono::NaiveTime::default()))
        })
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid date for {}", value, key)))
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
