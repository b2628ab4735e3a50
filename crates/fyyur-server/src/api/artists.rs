use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use fyyur_db::entities::artist;
use fyyur_db::forms::ArtistForm;
use fyyur_db::mutation::{self, Action};
use fyyur_db::views::{self, ArtistDetail, ArtistSummary, EditForm, SearchResults};
use fyyur_db::{request_now, AppState, EntityKind};
use std::sync::Arc;

use super::{read_error, write_error, ApiError, MutationResponse, SearchRequest};

/// GET /api/artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistSummary>>, ApiError> {
    views::artist_list(&state.db)
        .await
        .map(Json)
        .map_err(read_error)
}

/// POST /api/artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResults<artist::Model>>, ApiError> {
    views::artist_search(&state.db, &body.search_term)
        .await
        .map(Json)
        .map_err(read_error)
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, ApiError> {
    views::artist_page(&state.db, id, request_now())
        .await
        .map(Json)
        .map_err(read_error)
}

/// GET /api/artists/:id/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditForm<ArtistForm>>, ApiError> {
    views::artist_edit_form(&state.db, id)
        .await
        .map(Json)
        .map_err(read_error)
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    let name = form.name.trim().to_string();
    match mutation::create_artist(&state.db, form).await {
        Ok(a) => Ok((
            StatusCode::CREATED,
            Json(MutationResponse::done(
                EntityKind::Artist,
                Some(&a.name),
                Action::List,
                a.id,
            )),
        )),
        Err(e) => Err(write_error(e, EntityKind::Artist, Some(&name), Action::List)),
    }
}

/// PUT /api/artists/:id
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<MutationResponse>, ApiError> {
    let name = form.name.trim().to_string();
    match mutation::update_artist(&state.db, id, form).await {
        Ok(a) => Ok(Json(MutationResponse::done(
            EntityKind::Artist,
            Some(&a.name),
            Action::Update,
            a.id,
        ))),
        Err(e) => Err(write_error(
            e,
            EntityKind::Artist,
            Some(&name),
            Action::Update,
        )),
    }
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MutationResponse>, ApiError> {
    match mutation::delete_artist(&state.db, id).await {
        Ok(removed) => Ok(Json(MutationResponse::done(
            EntityKind::Artist,
            Some(&removed.record.name),
            Action::Delete,
            id,
        ))),
        Err(e) => Err(write_error(e, EntityKind::Artist, None, Action::Delete)),
    }
}
