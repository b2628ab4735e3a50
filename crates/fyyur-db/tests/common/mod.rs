// Shared fixtures for store-backed integration tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, Utc};
use fyyur_db::forms::{ArtistForm, VenueForm};
use fyyur_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A fresh in-memory SQLite store with the production schema applied.
///
/// Every connection to `sqlite::memory:` opens its own database, so the
/// pool is pinned to a single connection.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("open sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// A fixed reference instant so past/upcoming splits are deterministic.
pub fn fixed_now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z").expect("valid timestamp")
}

pub fn days_from(now: DateTime<FixedOffset>, days: i64) -> DateTime<FixedOffset> {
    (now + Duration::days(days)).with_timezone(&Utc).fixed_offset()
}

pub fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1015 Folsom St".into(),
        phone: Some("123-123-1234".into()),
        genres: vec!["Jazz".into(), "Reggae".into()],
        website_link: Some("https://www.themusicalhop.com".into()),
        seeking_talent: true,
        seeking_description: Some("Looking for local artists".into()),
        ..Default::default()
    }
}

pub fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.into(),
        city: "San Francisco".into(),
        state: "CA".into(),
        phone: Some("326-123-5000".into()),
        genres: vec!["Rock n Roll".into()],
        image_link: Some("https://images.unsplash.com/photo-1549213783".into()),
        ..Default::default()
    }
}
