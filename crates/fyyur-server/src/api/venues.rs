use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use fyyur_db::entities::venue;
use fyyur_db::forms::VenueForm;
use fyyur_db::mutation::{self, Action};
use fyyur_db::views::{self, Area, EditForm, SearchResults, VenueDetail};
use fyyur_db::{request_now, AppState, EntityKind};
use std::sync::Arc;

use super::{read_error, write_error, ApiError, MutationResponse, SearchRequest};

/// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Area>>, ApiError> {
    views::venues_by_area(&state.db, request_now())
        .await
        .map(Json)
        .map_err(read_error)
}

/// POST /api/venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResults<venue::Model>>, ApiError> {
    views::venue_search(&state.db, &body.search_term)
        .await
        .map(Json)
        .map_err(read_error)
}

/// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, ApiError> {
    views::venue_page(&state.db, id, request_now())
        .await
        .map(Json)
        .map_err(read_error)
}

/// GET /api/venues/:id/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditForm<VenueForm>>, ApiError> {
    views::venue_edit_form(&state.db, id)
        .await
        .map(Json)
        .map_err(read_error)
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    let name = form.name.trim().to_string();
    match mutation::create_venue(&state.db, form).await {
        Ok(v) => Ok((
            StatusCode::CREATED,
            Json(MutationResponse::done(
                EntityKind::Venue,
                Some(&v.name),
                Action::List,
                v.id,
            )),
        )),
        Err(e) => Err(write_error(e, EntityKind::Venue, Some(&name), Action::List)),
    }
}

/// PUT /api/venues/:id
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<VenueForm>,
) -> Result<Json<MutationResponse>, ApiError> {
    let name = form.name.trim().to_string();
    match mutation::update_venue(&state.db, id, form).await {
        Ok(v) => Ok(Json(MutationResponse::done(
            EntityKind::Venue,
            Some(&v.name),
            Action::Update,
            v.id,
        ))),
        Err(e) => Err(write_error(
            e,
            EntityKind::Venue,
            Some(&name),
            Action::Update,
        )),
    }
}

/// DELETE /api/venues/:id
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MutationResponse>, ApiError> {
    match mutation::delete_venue(&state.db, id).await {
        Ok(removed) => Ok(Json(MutationResponse::done(
            EntityKind::Venue,
            Some(&removed.record.name),
            Action::Delete,
            id,
        ))),
        Err(e) => Err(write_error(e, EntityKind::Venue, None, Action::Delete)),
    }
}
