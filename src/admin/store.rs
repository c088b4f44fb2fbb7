//! Persistence for the admin console. The schema belongs to the ticketing backend; nothing
//! here creates or migrates tables.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::fields::{Assignments, FieldValue};
use super::formset::CleanedConfigurations;
use super::query::ChangeListParams;
use super::resource::{AdminResource, EventForm, FormMode};
use super::site::ModelAdmin;
use crate::models::{Event, EventConfiguration, EventThumbnail};
use crate::utils::error::AppError;

pub async fn list<R: AdminResource>(
    pool: &PgPool,
    admin: &ModelAdmin,
    params: &ChangeListParams,
) -> Result<(Vec<R>, i64), AppError> {
    let mut count: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
    params.push_conditions(admin, &mut count);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut query: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("SELECT * FROM {}", R::TABLE));
    params.push_conditions(admin, &mut query);
    query.push(format!(" ORDER BY {} DESC LIMIT ", R::PRIMARY_KEY));
    query.push_bind(i64::from(params.per_page));
    query.push(" OFFSET ");
    query.push_bind(params.offset());

    let rows = query.build_query_as::<R>().fetch_all(pool).await?;
    Ok((rows, total))
}

pub async fn get<R: AdminResource>(pool: &PgPool, id: R::Id) -> Result<R, AppError> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
        "SELECT * FROM {} WHERE {} = ",
        R::TABLE,
        R::PRIMARY_KEY
    ));
    let label = id.to_string();
    let key: FieldValue = id.into();
    key.push_bind(&mut query);

    query
        .build_query_as::<R>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<R>(&label))
}

/// Validates the form and inserts the row, returning it as stored.
pub async fn insert<R: AdminResource>(
    conn: &mut PgConnection,
    form: R::Form,
) -> Result<R, AppError> {
    R::validate(&form, FormMode::Create)?;

    let mut assignments: Assignments = Vec::new();
    if let Some(id) = R::generate_id() {
        assignments.push((R::PRIMARY_KEY, id.into()));
    }
    assignments.extend(R::assignments(form, FormMode::Create));

    let columns: Vec<&str> = assignments.iter().map(|(column, _)| *column).collect();
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        R::TABLE,
        columns.join(", ")
    ));
    for (i, (_, value)) in assignments.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        value.push_bind(&mut query);
    }
    query.push(") RETURNING *");

    let row = query.build_query_as::<R>().fetch_one(&mut *conn).await?;
    tracing::info!(table = R::TABLE, id = %row.id(), "Admin record created");
    Ok(row)
}

pub async fn update<R: AdminResource>(
    conn: &mut PgConnection,
    id: R::Id,
    form: R::Form,
) -> Result<R, AppError> {
    R::validate(&form, FormMode::Update)?;

    let mut query: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("UPDATE {} SET ", R::TABLE));
    for (i, (column, value)) in R::assignments(form, FormMode::Update)
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            query.push(", ");
        }
        query.push(format!("{} = ", column));
        value.push_bind(&mut query);
    }
    query.push(format!(" WHERE {} = ", R::PRIMARY_KEY));
    let label = id.to_string();
    let key: FieldValue = id.into();
    key.push_bind(&mut query);
    query.push(" RETURNING *");

    let row = query
        .build_query_as::<R>()
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found::<R>(&label))?;
    tracing::info!(table = R::TABLE, id = %label, "Admin record updated");
    Ok(row)
}

pub async fn delete<R: AdminResource>(pool: &PgPool, id: R::Id) -> Result<(), AppError> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
        "DELETE FROM {} WHERE {} = ",
        R::TABLE,
        R::PRIMARY_KEY
    ));
    let label = id.to_string();
    let key: FieldValue = id.into();
    key.push_bind(&mut query);

    let result = query.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(not_found::<R>(&label));
    }
    tracing::info!(table = R::TABLE, id = %label, "Admin record deleted");
    Ok(())
}

fn not_found<R: AdminResource>(id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' was not found", R::NAME, id))
}

pub async fn event_configurations(
    pool: &PgPool,
    event_id: Uuid,
) -> Result<Vec<EventConfiguration>, AppError> {
    let rows = sqlx::query_as::<_, EventConfiguration>(
        "SELECT event_id, key, value FROM event_configurations WHERE event_id = $1 ORDER BY key",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn event_thumbnail(
    pool: &PgPool,
    thumbnail_id: Uuid,
) -> Result<Option<EventThumbnail>, AppError> {
    let thumbnail = sqlx::query_as::<_, EventThumbnail>(
        "SELECT id, uploaded_at, filename FROM events_thumbnails WHERE id = $1",
    )
    .bind(thumbnail_id)
    .fetch_optional(pool)
    .await?;
    Ok(thumbnail)
}

async fn apply_configurations(
    conn: &mut PgConnection,
    event_id: Uuid,
    configurations: CleanedConfigurations,
) -> Result<(), AppError> {
    for key in &configurations.deletions {
        sqlx::query("DELETE FROM event_configurations WHERE event_id = $1 AND key = $2")
            .bind(event_id)
            .bind(key)
            .execute(&mut *conn)
            .await?;
    }

    for (key, value) in &configurations.upserts {
        sqlx::query(
            "INSERT INTO event_configurations (event_id, key, value) VALUES ($1, $2, $3) \
             ON CONFLICT (event_id, key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(event_id)
        .bind(key)
        .bind(value)
        .execute(&mut *conn)
        .await?;
    }

    tracing::debug!(
        %event_id,
        upserts = configurations.upserts.len(),
        deletions = configurations.deletions.len(),
        "Event configurations saved"
    );
    Ok(())
}

/// Creates an event and its configuration rows atomically.
pub async fn create_event(
    pool: &PgPool,
    form: EventForm,
    configurations: CleanedConfigurations,
) -> Result<(Event, Vec<EventConfiguration>), AppError> {
    let mut tx = pool.begin().await?;
    let event = insert::<Event>(&mut *tx, form).await?;
    apply_configurations(&mut *tx, event.id, configurations).await?;
    tx.commit().await?;

    let stored = event_configurations(pool, event.id).await?;
    Ok((event, stored))
}

/// Updates an event and upserts or removes its configuration rows atomically.
pub async fn update_event(
    pool: &PgPool,
    event_id: Uuid,
    form: EventForm,
    configurations: CleanedConfigurations,
) -> Result<(Event, Vec<EventConfiguration>), AppError> {
    let mut tx = pool.begin().await?;
    let event = update::<Event>(&mut *tx, event_id, form).await?;
    apply_configurations(&mut *tx, event.id, configurations).await?;
    tx.commit().await?;

    let stored = event_configurations(pool, event.id).await?;
    Ok((event, stored))
}
