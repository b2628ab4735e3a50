//! Write operations: validate, write inside one transaction, then commit
//! or roll back as a unit.

use std::future::Future;
use std::pin::Pin;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionError, TransactionTrait,
};

use crate::entities::{artist, show, venue};
use crate::error::{DirectoryError, EntityKind};
use crate::forms::{clean, ArtistForm, ShowForm, VenueForm};

/// What a write was trying to do, for user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Update,
    Delete,
}

impl Action {
    fn past_tense(self) -> &'static str {
        match self {
            Action::List => "listed",
            Action::Update => "updated",
            Action::Delete => "deleted",
        }
    }
}

/// "Venue The Musical Hop was successfully listed!"
pub fn success_notice(entity: EntityKind, name: Option<&str>, action: Action) -> String {
    match name {
        Some(name) => format!(
            "{entity} {name} was successfully {}!",
            action.past_tense()
        ),
        None => format!("{entity} was successfully {}!", action.past_tense()),
    }
}

/// "An error occurred. Venue The Musical Hop could not be listed."
pub fn failure_notice(entity: EntityKind, name: Option<&str>, action: Action) -> String {
    match name {
        Some(name) => format!(
            "An error occurred. {entity} {name} could not be {}.",
            action.past_tense()
        ),
        None => format!(
            "An error occurred. {entity} could not be {}.",
            action.past_tense()
        ),
    }
}

/// A deleted parent record and how many shows went with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<M> {
    pub record: M,
    pub shows_removed: u64,
}

/// Run `op` in a transaction. `Ok` commits; any error rolls back every
/// write `op` made.
pub async fn atomically<T, F>(db: &DatabaseConnection, op: F) -> Result<T, DirectoryError>
where
    T: Send,
    F: for<'c> FnOnce(
            &'c DatabaseTransaction,
        )
            -> Pin<Box<dyn Future<Output = Result<T, DirectoryError>> + Send + 'c>>
        + Send,
{
    db.transaction::<F, T, DirectoryError>(op)
        .await
        .map_err(|err| match err {
            TransactionError::Connection(e) => DirectoryError::Database(e),
            TransactionError::Transaction(e) => e,
        })
}

fn apply_venue_form(active: &mut venue::ActiveModel, form: &VenueForm) {
    active.name = Set(form.name.trim().to_string());
    active.city = Set(form.city.trim().to_string());
    active.state = Set(form.state.trim().to_string());
    active.address = Set(form.address.trim().to_string());
    active.phone = Set(clean(&form.phone));
    active.image_link = Set(clean(&form.image_link));
    active.facebook_link = Set(clean(&form.facebook_link));
    active.website = Set(clean(&form.website_link));
    active.seeking_talent = Set(form.seeking_talent);
    active.seeking_description = Set(clean(&form.seeking_description));
    active.genres = Set(form.genres.clone().into());
}

fn apply_artist_form(active: &mut artist::ActiveModel, form: &ArtistForm) {
    active.name = Set(form.name.trim().to_string());
    active.city = Set(form.city.trim().to_string());
    active.state = Set(form.state.trim().to_string());
    active.phone = Set(clean(&form.phone));
    active.image_link = Set(clean(&form.image_link));
    active.facebook_link = Set(clean(&form.facebook_link));
    active.website = Set(clean(&form.website_link));
    active.seeking_venue = Set(form.seeking_venue);
    active.seeking_description = Set(clean(&form.seeking_description));
    active.genres = Set(form.genres.clone().into());
}

// ─── Venues ─────────────────────────────────────────────────────────────

pub async fn create_venue(
    db: &DatabaseConnection,
    form: VenueForm,
) -> Result<venue::Model, DirectoryError> {
    form.validate()?;

    let created = atomically(db, move |txn| {
        Box::pin(async move {
            let mut active = venue::ActiveModel {
                ..Default::default()
            };
            apply_venue_form(&mut active, &form);
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
    Ok(created)
}

/// Overwrite every field of an existing venue.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: i32,
    form: VenueForm,
) -> Result<venue::Model, DirectoryError> {
    form.validate()?;

    let updated = atomically(db, move |txn| {
        Box::pin(async move {
            let existing = venue::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or(DirectoryError::not_found(EntityKind::Venue, id))?;
            let mut active: venue::ActiveModel = existing.into();
            apply_venue_form(&mut active, &form);
            Ok(active.update(txn).await?)
        })
    })
    .await?;

    tracing::info!(venue_id = id, name = %updated.name, "venue updated");
    Ok(updated)
}

/// Delete a venue and every show it hosts.
pub async fn delete_venue(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Removed<venue::Model>, DirectoryError> {
    let removed = atomically(db, move |txn| {
        Box::pin(async move {
            let existing = venue::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or(DirectoryError::not_found(EntityKind::Venue, id))?;
            let shows = show::Entity::delete_many()
                .filter(show::Column::VenueId.eq(id))
                .exec(txn)
                .await?;
            venue::Entity::delete_by_id(id).exec(txn).await?;
            Ok(Removed {
                record: existing,
                shows_removed: shows.rows_affected,
            })
        })
    })
    .await?;

    tracing::info!(
        venue_id = id,
        shows_removed = removed.shows_removed,
        "venue deleted"
    );
    Ok(removed)
}

// ─── Artists ────────────────────────────────────────────────────────────

pub async fn create_artist(
    db: &DatabaseConnection,
    form: ArtistForm,
) -> Result<artist::Model, DirectoryError> {
    form.validate()?;

    let created = atomically(db, move |txn| {
        Box::pin(async move {
            let mut active = artist::ActiveModel {
                ..Default::default()
            };
            apply_artist_form(&mut active, &form);
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
    Ok(created)
}

pub async fn update_artist(
    db: &DatabaseConnection,
    id: i32,
    form: ArtistForm,
) -> Result<artist::Model, DirectoryError> {
    form.validate()?;

    let updated = atomically(db, move |txn| {
        Box::pin(async move {
            let existing = artist::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or(DirectoryError::not_found(EntityKind::Artist, id))?;
            let mut active: artist::ActiveModel = existing.into();
            apply_artist_form(&mut active, &form);
            Ok(active.update(txn).await?)
        })
    })
    .await?;

    tracing::info!(artist_id = id, name = %updated.name, "artist updated");
    Ok(updated)
}

/// Delete an artist and every show they play.
pub async fn delete_artist(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Removed<artist::Model>, DirectoryError> {
    let removed = atomically(db, move |txn| {
        Box::pin(async move {
            let existing = artist::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or(DirectoryError::not_found(EntityKind::Artist, id))?;
            let shows = show::Entity::delete_many()
                .filter(show::Column::ArtistId.eq(id))
                .exec(txn)
                .await?;
            artist::Entity::delete_by_id(id).exec(txn).await?;
            Ok(Removed {
                record: existing,
                shows_removed: shows.rows_affected,
            })
        })
    })
    .await?;

    tracing::info!(
        artist_id = id,
        shows_removed = removed.shows_removed,
        "artist deleted"
    );
    Ok(removed)
}

// ─── Shows ──────────────────────────────────────────────────────────────

/// Schedule a show. Both parents are resolved inside the transaction; a
/// missing one is reported as `MissingParent`. Start times are stored in
/// UTC and default to `now`.
pub async fn create_show(
    db: &DatabaseConnection,
    form: ShowForm,
    now: DateTimeWithTimeZone,
) -> Result<show::Model, DirectoryError> {
    form.validate()?;
    let start_time = form
        .start_time
        .unwrap_or(now)
        .with_timezone(&chrono::Utc)
        .fixed_offset();

    let created = atomically(db, move |txn| {
        Box::pin(async move {
            if venue::Entity::find_by_id(form.venue_id)
                .one(txn)
                .await?
                .is_none()
            {
                return Err(DirectoryError::MissingParent {
                    entity: EntityKind::Venue,
                    id: form.venue_id,
                });
            }
            if artist::Entity::find_by_id(form.artist_id)
                .one(txn)
                .await?
                .is_none()
            {
                return Err(DirectoryError::MissingParent {
                    entity: EntityKind::Artist,
                    id: form.artist_id,
                });
            }

            let active = show::ActiveModel {
                venue_id: Set(form.venue_id),
                artist_id: Set(form.artist_id),
                start_time: Set(start_time),
                ..Default::default()
            };
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(
        show_id = created.id,
        venue_id = created.venue_id,
        artist_id = created.artist_id,
        "show listed"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Genres;

    #[test]
    fn test_success_notice_with_name() {
        assert_eq!(
            success_notice(EntityKind::Venue, Some("The Musical Hop"), Action::List),
            "Venue The Musical Hop was successfully listed!"
        );
        assert_eq!(
            success_notice(EntityKind::Artist, Some("Guns N Petals"), Action::Update),
            "Artist Guns N Petals was successfully updated!"
        );
    }

    #[test]
    fn test_success_notice_without_name() {
        assert_eq!(
            success_notice(EntityKind::Show, None, Action::List),
            "Show was successfully listed!"
        );
        assert_eq!(
            success_notice(EntityKind::Venue, None, Action::Delete),
            "Venue was successfully deleted!"
        );
    }

    #[test]
    fn test_failure_notice() {
        assert_eq!(
            failure_notice(EntityKind::Venue, Some("The Musical Hop"), Action::List),
            "An error occurred. Venue The Musical Hop could not be listed."
        );
        assert_eq!(
            failure_notice(EntityKind::Show, None, Action::List),
            "An error occurred. Show could not be listed."
        );
    }

    #[test]
    fn test_apply_venue_form_cleans_optional_fields() {
        let form = VenueForm {
            name: " The Musical Hop ".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom St".into(),
            phone: Some("".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            genres: vec!["Jazz".into()],
            ..Default::default()
        };
        let mut active = venue::ActiveModel {
            ..Default::default()
        };
        apply_venue_form(&mut active, &form);
        assert_eq!(active.name, Set("The Musical Hop".to_string()));
        assert_eq!(active.phone, Set(None));
        assert_eq!(
            active.website,
            Set(Some("https://www.themusicalhop.com".to_string()))
        );
        assert_eq!(active.genres, Set(Genres(vec!["Jazz".to_string()])));
    }

    #[tokio::test]
    async fn test_validation_short_circuits_before_store() {
        // A disconnected handle errors on any query, so reaching the store
        // would surface as Database rather than Validation.
        let db = DatabaseConnection::Disconnected;
        let err = create_venue(&db, VenueForm::default()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }
}
