//! Handlers for the `/schedules` resource.
//!
//! Reads are public or authenticated; the `manage` routes are staff-only
//! and publish platform events that drive notification fan-out. Geocoding
//! is best-effort: an unresolvable location leaves the coordinates NULL
//! and never fails the request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use fansync_core::error::CoreError;
use fansync_core::types::{DbId, Timestamp};
use fansync_db::models::schedule::{CreateSchedule, Schedule, UpdateSchedule};
use fansync_db::repositories::{ArtistGroupRepo, ArtistRepo, FavoriteRepo, ScheduleRepo};
use fansync_events::bus::{PlatformEvent, SCHEDULE_CREATED, SCHEDULE_DELETED, SCHEDULE_UPDATED};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::notifications::Recipient;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Which side of the exactly-one owner constraint a manage route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OwnerSide {
    Artist,
    ArtistGroup,
}

impl OwnerSide {
    /// `true` when `schedule` belongs to this side. Manage routes treat
    /// schedules from the other side as not found.
    fn owns(self, schedule: &Schedule) -> bool {
        match self {
            OwnerSide::Artist => schedule.artist_id.is_some(),
            OwnerSide::ArtistGroup => schedule.artist_group_id.is_some(),
        }
    }
}

/// Request body for the manage create routes. The artist route requires
/// `artist_id`, the group route `artist_group_id`.
#[derive(Debug, Deserialize)]
pub struct ManageScheduleRequest {
    pub artist_id: Option<DbId>,
    pub artist_group_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/schedules
///
/// Public listing, active schedules only unless `?include_inactive=true`.
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_schedule(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;

    Ok(Json(DataResponse { data: schedule }))
}

/// GET /api/v1/schedules/artist/{artist_id}
pub async fn list_for_artist(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(artist_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list_for_artist(&state.pool, artist_id).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/artist-group/{group_id}
pub async fn list_for_artist_group(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(group_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list_for_artist_group(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/favorites
///
/// Schedules the caller has favorited.
pub async fn list_my_favorites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let schedules = ScheduleRepo::list_favorited_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(DataResponse { data: schedules }))
}

// ---------------------------------------------------------------------------
// Staff manage routes
// ---------------------------------------------------------------------------

/// POST /api/v1/schedules/artist/manage (staff)
pub async fn create_for_artist(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<ManageScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    create_schedule(state, staff, OwnerSide::Artist, input).await
}

/// POST /api/v1/schedules/artist-group/manage (staff)
pub async fn create_for_artist_group(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<ManageScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    create_schedule(state, staff, OwnerSide::ArtistGroup, input).await
}

/// PATCH /api/v1/schedules/artist/manage/{id} (staff)
pub async fn update_for_artist(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    update_schedule(state, staff, OwnerSide::Artist, id, input).await
}

/// PATCH /api/v1/schedules/artist-group/manage/{id} (staff)
pub async fn update_for_artist_group(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    update_schedule(state, staff, OwnerSide::ArtistGroup, id, input).await
}

/// DELETE /api/v1/schedules/artist/manage/{id} (staff)
pub async fn delete_for_artist(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    delete_schedule(state, staff, OwnerSide::Artist, id).await
}

/// DELETE /api/v1/schedules/artist-group/manage/{id} (staff)
pub async fn delete_for_artist_group(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    delete_schedule(state, staff, OwnerSide::ArtistGroup, id).await
}

// ---------------------------------------------------------------------------
// Shared manage logic
// ---------------------------------------------------------------------------

async fn create_schedule(
    state: AppState,
    staff: AuthUser,
    side: OwnerSide,
    input: ManageScheduleRequest,
) -> AppResult<(StatusCode, Json<DataResponse<Schedule>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Schedule title must not be empty".into(),
        )));
    }

    // 1. Resolve the owning entity; its name goes into the created event.
    let (owner_artist_id, owner_group_id, display_name) = match side {
        OwnerSide::Artist => {
            let artist_id = input.artist_id.ok_or_else(|| {
                AppError::BadRequest("artist_id is required".into())
            })?;
            let artist = ArtistRepo::find_by_id(&state.pool, artist_id).await?.ok_or(
                AppError::Core(CoreError::NotFound {
                    entity: "Artist",
                    id: artist_id,
                }),
            )?;
            (Some(artist.id), None, artist.name)
        }
        OwnerSide::ArtistGroup => {
            let group_id = input.artist_group_id.ok_or_else(|| {
                AppError::BadRequest("artist_group_id is required".into())
            })?;
            let group = ArtistGroupRepo::find_by_id(&state.pool, group_id).await?.ok_or(
                AppError::Core(CoreError::NotFound {
                    entity: "ArtistGroup",
                    id: group_id,
                }),
            )?;
            (None, Some(group.id), group.name)
        }
    };

    // 2. Best-effort geocoding of the location string.
    let coords = resolve_coordinates(&state, input.location.as_deref()).await;

    // 3. Insert.
    let schedule = ScheduleRepo::create(
        &state.pool,
        &CreateSchedule {
            title: input.title,
            description: input.description,
            start_at: input.start_at,
            end_at: input.end_at,
            location: input.location,
            image_url: input.image_url,
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lon)| lon),
            artist_id: owner_artist_id,
            artist_group_id: owner_group_id,
            user_id: Some(staff.user_id),
        },
    )
    .await?;

    // 4. Tell the fans. The dispatcher resolves the likers.
    let payload = match side {
        OwnerSide::Artist => json!({
            "title": schedule.title,
            "artist_id": owner_artist_id,
            "display_name": display_name,
        }),
        OwnerSide::ArtistGroup => json!({
            "title": schedule.title,
            "artist_group_id": owner_group_id,
            "display_name": display_name,
        }),
    };
    state.event_bus.publish(
        PlatformEvent::new(SCHEDULE_CREATED)
            .with_source("schedule", schedule.id)
            .with_actor(staff.user_id)
            .with_payload(payload),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

async fn update_schedule(
    state: AppState,
    staff: AuthUser,
    side: OwnerSide,
    id: DbId,
    input: UpdateSchedule,
) -> AppResult<Json<DataResponse<Schedule>>> {
    // 1. The schedule must exist on this route's side.
    let existing = find_owned_schedule(&state, side, id).await?;

    // 2. A new location is re-geocoded; failures keep the old coordinates.
    let new_coords = match input.location.as_deref() {
        Some(location) if location.trim() != existing.location.as_deref().unwrap_or("") => {
            resolve_coordinates(&state, Some(location)).await
        }
        _ => None,
    };

    // 3. Apply the partial update.
    let mut updated = ScheduleRepo::update(&state.pool, id, &input).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }),
    )?;

    if let Some((lat, lon)) = new_coords {
        ScheduleRepo::set_coordinates(&state.pool, id, Some(lat), Some(lon)).await?;
        updated.latitude = Some(lat);
        updated.longitude = Some(lon);
    }

    // 4. Tell the favoriters.
    state.event_bus.publish(
        PlatformEvent::new(SCHEDULE_UPDATED)
            .with_source("schedule", updated.id)
            .with_actor(staff.user_id)
            .with_payload(json!({ "title": updated.title })),
    );

    Ok(Json(DataResponse { data: updated }))
}

async fn delete_schedule(
    state: AppState,
    staff: AuthUser,
    side: OwnerSide,
    id: DbId,
) -> AppResult<StatusCode> {
    let schedule = find_owned_schedule(&state, side, id).await?;

    // Snapshot the favoriters before the delete cascades their rows away;
    // the deletion notices are sent from this snapshot.
    let recipients: Vec<Recipient> = FavoriteRepo::list_for_schedule(&state.pool, id)
        .await?
        .into_iter()
        .map(|f| Recipient {
            user_id: f.user_id,
            email: f.user_email,
            nickname: f.user_nickname,
        })
        .collect();

    let deleted = ScheduleRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }));
    }

    state.event_bus.publish(
        PlatformEvent::new(SCHEDULE_DELETED)
            .with_source("schedule", id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "title": schedule.title,
                "recipients": recipients,
            })),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a schedule for a manage route, treating rows owned by the other
/// side as missing.
async fn find_owned_schedule(
    state: &AppState,
    side: OwnerSide,
    id: DbId,
) -> AppResult<Schedule> {
    let schedule = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|s| side.owns(s))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))?;
    Ok(schedule)
}

/// Geocode a location string, if any. Whitespace-only input and transport
/// or parse failures all come back as `None`.
async fn resolve_coordinates(state: &AppState, location: Option<&str>) -> Option<(f64, f64)> {
    let query = location?.trim();
    if query.is_empty() {
        return None;
    }
    state.geocoder.as_ref()?.geocode(query).await
}
