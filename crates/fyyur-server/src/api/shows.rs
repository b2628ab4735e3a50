use axum::{extract::State, http::StatusCode, Json};
use fyyur_db::forms::ShowForm;
use fyyur_db::mutation::{self, Action};
use fyyur_db::views::{self, ShowListing};
use fyyur_db::{request_now, AppState, EntityKind};
use std::sync::Arc;

use super::{read_error, write_error, ApiError, MutationResponse};

/// GET /api/shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, ApiError> {
    views::show_list(&state.db)
        .await
        .map(Json)
        .map_err(read_error)
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    match mutation::create_show(&state.db, form, request_now()).await {
        Ok(show) => Ok((
            StatusCode::CREATED,
            Json(MutationResponse::done(
                EntityKind::Show,
                None,
                Action::List,
                show.id,
            )),
        )),
        Err(e) => Err(write_error(e, EntityKind::Show, None, Action::List)),
    }
}
