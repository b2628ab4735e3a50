pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{http::StatusCode, Json};
use fyyur_db::forms::{FieldError, RESUBMIT_NOTICE};
use fyyur_db::mutation::{failure_notice, success_notice, Action};
use fyyur_db::{DirectoryError, EntityKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// Outcome of a create/update/delete, carrying the flash notice.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl MutationResponse {
    pub fn done(entity: EntityKind, name: Option<&str>, action: Action, id: i32) -> Self {
        Self {
            success: true,
            message: success_notice(entity, name, action),
            id: Some(id),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_body(status: StatusCode, error: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error,
            fields: None,
        }),
    )
}

/// Map a failed read. Store details are logged, never returned.
pub fn read_error(err: DirectoryError) -> ApiError {
    match err {
        DirectoryError::NotFound { .. } => error_body(StatusCode::NOT_FOUND, err.to_string()),
        DirectoryError::Validation(_) | DirectoryError::MissingParent { .. } => {
            error_body(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        DirectoryError::Database(e) => {
            tracing::error!(error = %e, "directory read failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
        }
    }
}

/// Map a failed write to its status and notice.
pub fn write_error(
    err: DirectoryError,
    entity: EntityKind,
    name: Option<&str>,
    action: Action,
) -> ApiError {
    match err {
        DirectoryError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: RESUBMIT_NOTICE.to_string(),
                fields: Some(errors.0),
            }),
        ),
        DirectoryError::NotFound { .. } => error_body(StatusCode::NOT_FOUND, err.to_string()),
        DirectoryError::MissingParent { .. } => error_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} ({err})", failure_notice(entity, name, action)),
        ),
        DirectoryError::Database(e) => {
            tracing::error!(%entity, error = %e, "write rolled back");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                failure_notice(entity, name, action),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_db::forms::ValidationErrors;
    use fyyur_db::sea_orm::DbErr;

    #[test]
    fn test_read_error_statuses() {
        let (status, _) = read_error(DirectoryError::not_found(EntityKind::Venue, 3));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, Json(body)) =
            read_error(DirectoryError::Database(DbErr::Custom("boom".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("boom"));
    }

    #[test]
    fn test_write_error_validation_lists_fields() {
        let errors = ValidationErrors(vec![FieldError {
            field: "phone",
            message: "must look like xxx-xxx-xxxx".into(),
        }]);
        let (status, Json(body)) = write_error(
            errors.into(),
            EntityKind::Venue,
            Some("The Musical Hop"),
            Action::List,
        );
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, RESUBMIT_NOTICE);
        assert_eq!(body.fields.map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_write_error_store_failure_uses_notice() {
        let (status, Json(body)) = write_error(
            DirectoryError::Database(DbErr::Custom("constraint".into())),
            EntityKind::Artist,
            Some("Guns N Petals"),
            Action::List,
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body.error,
            "An error occurred. Artist Guns N Petals could not be listed."
        );
    }

    #[test]
    fn test_write_error_missing_parent() {
        let (status, Json(body)) = write_error(
            DirectoryError::MissingParent {
                entity: EntityKind::Venue,
                id: 9,
            },
            EntityKind::Show,
            None,
            Action::List,
        );
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.error.starts_with("An error occurred. Show could not be listed."));
        assert!(body.error.contains("Venue 9"));
    }
}
