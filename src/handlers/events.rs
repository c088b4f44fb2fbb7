//! Event add/change views with the configuration inline.

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::admin::defaults::{build_configuration_formset, ConfigurationFormset, EXTRA_ROWS};
use crate::admin::formset::{clean_configuration_rows, ConfigurationSubmission};
use crate::admin::resource::{local_now, EventForm};
use crate::admin::site::{choices, ChoiceOption};
use crate::admin::store;
use crate::models::{Event, EventConfiguration, EventStatus, EventThumbnail};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{AppJson, AppPath};
use crate::utils::response::{created, success};

#[derive(Debug, Serialize)]
pub struct EventInitial {
    pub status: EventStatus,
}

#[derive(Debug, Serialize)]
pub struct EventFormView {
    pub is_new: bool,
    pub event: Option<Event>,
    pub initial: EventInitial,
    pub thumbnail: Option<EventThumbnail>,
    pub status_choices: Vec<ChoiceOption>,
    pub configurations: ConfigurationFormset,
}

impl EventFormView {
    fn build(
        event: Option<Event>,
        thumbnail: Option<EventThumbnail>,
        persisted: &[EventConfiguration],
    ) -> Self {
        let is_new = event.is_none();
        Self {
            is_new,
            initial: EventInitial {
                status: event.as_ref().map(|e| e.status).unwrap_or_default(),
            },
            event,
            thumbnail,
            status_choices: choices::<EventStatus>(),
            configurations: build_configuration_formset(
                is_new,
                persisted,
                EXTRA_ROWS,
                local_now(),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EventSubmission {
    pub event: EventForm,
    #[serde(default)]
    pub configurations: Vec<ConfigurationSubmission>,
}

#[derive(Debug, Serialize)]
pub struct SavedEvent {
    pub event: Event,
    pub configurations: Vec<EventConfiguration>,
}

pub async fn add_form() -> Response {
    success(EventFormView::build(None, None, &[]), "New event form")
}

pub async fn change_form(
    State(state): State<AppState>,
    AppPath(event_id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let event = store::get::<Event>(&state.pool, event_id).await?;
    let thumbnail = match event.event_thumbnail_id {
        Some(thumbnail_id) => store::event_thumbnail(&state.pool, thumbnail_id).await?,
        None => None,
    };
    let persisted = store::event_configurations(&state.pool, event_id).await?;

    Ok(success(
        EventFormView::build(Some(event), thumbnail, &persisted),
        "Event change form",
    ))
}

pub async fn add(
    State(state): State<AppState>,
    AppJson(submission): AppJson<EventSubmission>,
) -> Result<Response, AppError> {
    let configurations = clean_configuration_rows(submission.configurations)?;
    let (event, configurations) =
        store::create_event(&state.pool, submission.event, configurations).await?;

    Ok(created(
        SavedEvent {
            event,
            configurations,
        },
        "Event created",
    ))
}

pub async fn change(
    State(state): State<AppState>,
    AppPath(event_id): AppPath<Uuid>,
    AppJson(submission): AppJson<EventSubmission>,
) -> Result<Response, AppError> {
    let configurations = clean_configuration_rows(submission.configurations)?;
    let (event, configurations) =
        store::update_event(&state.pool, event_id, submission.event, configurations).await?;

    Ok(success(
        SavedEvent {
            event,
            configurations,
        },
        "Event updated",
    ))
}
