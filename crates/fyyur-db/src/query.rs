//! Read-side queries over venues, artists and shows.
//!
//! Relationships are fetched with explicit joins or batched lookups; no
//! function here writes to the store.

use std::collections::{BTreeMap, HashMap, HashSet};

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{artist, show, venue};

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<venue::Model>,
}

/// Shows split around a single instant: `past` holds shows at or before
/// it, `upcoming` those strictly after.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Partitioned<T> {
    pub fn total(&self) -> usize {
        self.past.len() + self.upcoming.len()
    }
}

/// A show joined with the artist playing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowWithArtist {
    pub show: show::Model,
    pub artist: artist::Model,
}

/// A show joined with the venue hosting it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowWithVenue {
    pub show: show::Model,
    pub venue: venue::Model,
}

/// A show joined with both parents.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowWithParents {
    pub show: show::Model,
    pub venue: venue::Model,
    pub artist: artist::Model,
}

// ─── Group by location ──────────────────────────────────────────────────

/// Group venues by (city, state). Groups come out ordered by state then
/// city; venues keep their incoming order within a group.
pub fn group_by_location(venues: Vec<venue::Model>) -> Vec<LocationGroup> {
    let mut groups: BTreeMap<(String, String), Vec<venue::Model>> = BTreeMap::new();
    for v in venues {
        groups
            .entry((v.state.clone(), v.city.clone()))
            .or_default()
            .push(v);
    }
    groups
        .into_iter()
        .map(|((state, city), venues)| LocationGroup {
            city,
            state,
            venues,
        })
        .collect()
}

pub async fn venues_by_location<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<LocationGroup>, DbErr> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;
    Ok(group_by_location(venues))
}

// ─── Substring search ───────────────────────────────────────────────────

/// Lowercase the term and escape LIKE wildcards so they match literally.
/// Whitespace is part of the term.
pub fn escape_like(term: &str) -> String {
    term.to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case-insensitive containment pattern. An empty term matches all.
/// SQLite's `lower()` folds ASCII only, so names with uppercase non-ASCII
/// letters match case-insensitively on Postgres but not on SQLite.
fn name_contains(column: impl IntoColumnRef, term: &str) -> SimpleExpr {
    let pattern = LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\');
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

pub async fn search_venues<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<Vec<venue::Model>, DbErr> {
    venue::Entity::find()
        .filter(name_contains((venue::Entity, venue::Column::Name), term))
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await
}

pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<Vec<artist::Model>, DbErr> {
    artist::Entity::find()
        .filter(name_contains((artist::Entity, artist::Column::Name), term))
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
}

// ─── Time-partitioned shows ─────────────────────────────────────────────

/// Split items by start time around `now`. A start exactly at `now` is past.
pub fn partition_by_start<T>(
    items: Vec<T>,
    now: DateTimeWithTimeZone,
    start: impl Fn(&T) -> DateTimeWithTimeZone,
) -> Partitioned<T> {
    let (upcoming, past): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| start(item) > now);
    Partitioned { past, upcoming }
}

pub async fn venue_shows<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
    now: DateTimeWithTimeZone,
) -> Result<Partitioned<ShowWithArtist>, DbErr> {
    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(venue_id))
        .find_also_related(artist::Entity)
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    // Inner-join semantics: rows without a parent are skipped.
    let joined = rows
        .into_iter()
        .filter_map(|(show, artist)| artist.map(|artist| ShowWithArtist { show, artist }))
        .collect();

    Ok(partition_by_start(joined, now, |s| s.show.start_time))
}

pub async fn artist_shows<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
    now: DateTimeWithTimeZone,
) -> Result<Partitioned<ShowWithVenue>, DbErr> {
    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(artist_id))
        .find_also_related(venue::Entity)
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    let joined = rows
        .into_iter()
        .filter_map(|(show, venue)| venue.map(|venue| ShowWithVenue { show, venue }))
        .collect();

    Ok(partition_by_start(joined, now, |s| s.show.start_time))
}

/// Number of upcoming shows per venue. Venues with none are absent from
/// the map.
pub async fn upcoming_counts_by_venue<C: ConnectionTrait>(
    db: &C,
    venue_ids: &[i32],
    now: DateTimeWithTimeZone,
) -> Result<HashMap<i32, u64>, DbErr> {
    if venue_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i64)> = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(
            Expr::col((show::Entity, show::Column::Id)).count(),
            "upcoming",
        )
        .filter(show::Column::VenueId.is_in(venue_ids.iter().copied()))
        .filter(show::Column::StartTime.gt(now))
        .group_by(show::Column::VenueId)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(venue_id, n)| (venue_id, n.max(0) as u64))
        .collect())
}

// ─── Recent entities ────────────────────────────────────────────────────

pub async fn recent_venues<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<venue::Model>, DbErr> {
    venue::Entity::find()
        .order_by_desc(venue::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

pub async fn recent_artists<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<artist::Model>, DbErr> {
    artist::Entity::find()
        .order_by_desc(artist::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

// ─── Lookups and listings ───────────────────────────────────────────────

pub async fn find_venue<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<venue::Model>, DbErr> {
    venue::Entity::find_by_id(id).one(db).await
}

pub async fn find_artist<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<artist::Model>, DbErr> {
    artist::Entity::find_by_id(id).one(db).await
}

pub async fn all_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<artist::Model>, DbErr> {
    artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
}

/// Every show with both parents, ordered by start time.
pub async fn all_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowWithParents>, DbErr> {
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    // Batch-fetch both sides instead of one lookup per show
    let venue_ids: Vec<i32> = shows
        .iter()
        .map(|s| s.venue_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let artist_ids: Vec<i32> = shows
        .iter()
        .map(|s| s.artist_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let venues: HashMap<i32, venue::Model> = if venue_ids.is_empty() {
        HashMap::new()
    } else {
        venue::Entity::find()
            .filter(venue::Column::Id.is_in(venue_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect()
    };

    let artists: HashMap<i32, artist::Model> = if artist_ids.is_empty() {
        HashMap::new()
    } else {
        artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    Ok(shows
        .into_iter()
        .filter_map(|show| {
            let venue = venues.get(&show.venue_id)?.clone();
            let artist = artists.get(&show.artist_id)?.clone();
            Some(ShowWithParents {
                show,
                venue,
                artist,
            })
        })
        .collect())
}
