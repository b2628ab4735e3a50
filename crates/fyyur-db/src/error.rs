//! Error types for directory reads and writes.

use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

use crate::forms::ValidationErrors;

/// The three record kinds the directory stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Venue,
    Artist,
    Show,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Venue => "Venue",
            EntityKind::Artist => "Artist",
            EntityKind::Show => "Show",
        })
    }
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    /// A show referenced a venue or artist that does not exist.
    #[error("show references missing {entity} {id}")]
    MissingParent { entity: EntityKind, id: i32 },

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl DirectoryError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<ValidationErrors> for DirectoryError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldError;

    #[test]
    fn test_display_not_found() {
        let err = DirectoryError::not_found(EntityKind::Venue, 7);
        assert_eq!(err.to_string(), "Venue 7 not found");
    }

    #[test]
    fn test_display_missing_parent() {
        let err = DirectoryError::MissingParent {
            entity: EntityKind::Artist,
            id: 3,
        };
        assert_eq!(err.to_string(), "show references missing Artist 3");
    }

    #[test]
    fn test_display_validation() {
        let err: DirectoryError = ValidationErrors(vec![FieldError {
            field: "phone",
            message: "must be formatted xxx-xxx-xxxx".into(),
        }])
        .into();
        assert_eq!(
            err.to_string(),
            "validation failed: phone: must be formatted xxx-xxx-xxxx"
        );
    }

    #[test]
    fn test_from_db_error() {
        let err: DirectoryError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, DirectoryError::Database(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err: DirectoryError = DbErr::Custom("boom".into()).into();
        assert!(err.source().is_some());
        assert!(DirectoryError::not_found(EntityKind::Show, 1).source().is_none());
    }
}
