//! Changelist and CRUD endpoints shared by every registered table.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Serialize;
use std::collections::HashMap;

use crate::admin::query::ChangeListParams;
use crate::admin::{store, AdminResource};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{AppJson, AppPath};
use crate::utils::response::{created, empty_success, success, Page};

#[derive(Debug, Serialize)]
pub struct ChangeListRow<R: Serialize> {
    pub label: String,
    pub record: R,
}

impl<R: AdminResource> From<R> for ChangeListRow<R> {
    fn from(record: R) -> Self {
        Self {
            label: record.label(),
            record,
        }
    }
}

pub async fn list<R: AdminResource>(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let admin = R::model_admin();
    let params = ChangeListParams::parse(&admin, &raw, state.page_size)?;
    let (rows, total) = store::list::<R>(&state.pool, &admin, &params).await?;

    let page = Page {
        items: rows.into_iter().map(ChangeListRow::from).collect(),
        page: params.page,
        per_page: params.per_page,
        total,
    };
    Ok(success(page, format!("{} listed", admin.verbose_name_plural)))
}

pub async fn detail<R: AdminResource>(
    State(state): State<AppState>,
    AppPath(id): AppPath<R::Id>,
) -> Result<Response, AppError> {
    let record = store::get::<R>(&state.pool, id).await?;
    Ok(success(ChangeListRow::from(record), format!("{} found", R::NAME)))
}

pub async fn create<R: AdminResource>(
    State(state): State<AppState>,
    AppJson(form): AppJson<R::Form>,
) -> Result<Response, AppError> {
    let mut conn = state.pool.acquire().await?;
    let record = store::insert::<R>(&mut conn, form).await?;
    Ok(created(ChangeListRow::from(record), format!("{} created", R::NAME)))
}

pub async fn update<R: AdminResource>(
    State(state): State<AppState>,
    AppPath(id): AppPath<R::Id>,
    AppJson(form): AppJson<R::Form>,
) -> Result<Response, AppError> {
    let mut conn = state.pool.acquire().await?;
    let record = store::update::<R>(&mut conn, id, form).await?;
    Ok(success(ChangeListRow::from(record), format!("{} updated", R::NAME)))
}

pub async fn delete<R: AdminResource>(
    State(state): State<AppState>,
    AppPath(id): AppPath<R::Id>,
) -> Result<Response, AppError> {
    store::delete::<R>(&state.pool, id).await?;
    Ok(empty_success(format!("{} deleted", R::NAME)))
}
