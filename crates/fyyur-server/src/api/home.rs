use axum::{extract::State, Json};
use fyyur_db::views::{self, Home};
use fyyur_db::AppState;
use std::sync::Arc;

use super::{read_error, ApiError};

/// GET /api/home
pub async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<Home>, ApiError> {
    views::home(&state.db, state.recent_limit)
        .await
        .map(Json)
        .map_err(read_error)
}
