//! Display-ready structures for the presentation layer.
//!
//! Field names are part of the contract with the templates/clients
//! (`num_upcoming_shows`, `past_shows_count`, ...). Assembly never writes.

use std::collections::HashMap;

use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::entities::{artist, venue};
use crate::error::{DirectoryError, EntityKind};
use crate::forms::{ArtistForm, VenueForm};
use crate::query::{
    self, LocationGroup, Partitioned, ShowWithArtist, ShowWithParents, ShowWithVenue,
};

// ─── View models ────────────────────────────────────────────────────────

/// A show seen from its venue page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShowSlot {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl From<ShowWithArtist> for ArtistShowSlot {
    fn from(s: ShowWithArtist) -> Self {
        Self {
            artist_id: s.artist.id,
            artist_name: s.artist.name,
            artist_image_link: s.artist.image_link,
            start_time: s.show.start_time,
        }
    }
}

/// A show seen from its artist page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShowSlot {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl From<ShowWithVenue> for VenueShowSlot {
    fn from(s: ShowWithVenue) -> Self {
        Self {
            venue_id: s.venue.id,
            venue_name: s.venue.name,
            venue_image_link: s.venue.image_link,
            start_time: s.show.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowSlot>,
    pub upcoming_shows: Vec<ArtistShowSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowSlot>,
    pub upcoming_shows: Vec<VenueShowSlot>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults<T: Serialize> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> From<Vec<T>> for SearchResults<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

impl From<artist::Model> for ArtistSummary {
    fn from(a: artist::Model) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl From<ShowWithParents> for ShowListing {
    fn from(s: ShowWithParents) -> Self {
        Self {
            venue_id: s.venue.id,
            venue_name: s.venue.name,
            artist_id: s.artist.id,
            artist_name: s.artist.name,
            artist_image_link: s.artist.image_link,
            start_time: s.show.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Home {
    pub recent_venues: Vec<venue::Model>,
    pub recent_artists: Vec<artist::Model>,
}

/// Edit page payload: the record's id plus its prefilled form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditForm<F: Serialize> {
    pub id: i32,
    pub form: F,
}

// ─── Pure assembly ──────────────────────────────────────────────────────

pub fn venue_detail(v: venue::Model, shows: Partitioned<ShowWithArtist>) -> VenueDetail {
    let past_shows: Vec<ArtistShowSlot> = shows.past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<ArtistShowSlot> =
        shows.upcoming.into_iter().map(Into::into).collect();

    VenueDetail {
        id: v.id,
        name: v.name,
        genres: v.genres.0,
        address: v.address,
        city: v.city,
        state: v.state,
        phone: v.phone,
        website: v.website,
        facebook_link: v.facebook_link,
        seeking_talent: v.seeking_talent,
        seeking_description: v.seeking_description,
        image_link: v.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub fn artist_detail(a: artist::Model, shows: Partitioned<ShowWithVenue>) -> ArtistDetail {
    let past_shows: Vec<VenueShowSlot> = shows.past.into_iter().map(Into::into).collect();
    let upcoming_shows: Vec<VenueShowSlot> =
        shows.upcoming.into_iter().map(Into::into).collect();

    ArtistDetail {
        id: a.id,
        name: a.name,
        genres: a.genres.0,
        city: a.city,
        state: a.state,
        phone: a.phone,
        website: a.website,
        facebook_link: a.facebook_link,
        seeking_venue: a.seeking_venue,
        seeking_description: a.seeking_description,
        image_link: a.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Attach per-venue upcoming counts to location groups. Venues missing
/// from `upcoming` have none.
pub fn areas(groups: Vec<LocationGroup>, upcoming: &HashMap<i32, u64>) -> Vec<Area> {
    groups
        .into_iter()
        .map(|g| Area {
            city: g.city,
            state: g.state,
            venues: g
                .venues
                .into_iter()
                .map(|v| AreaVenue {
                    num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
                    id: v.id,
                    name: v.name,
                })
                .collect(),
        })
        .collect()
}

// ─── Page loaders ───────────────────────────────────────────────────────

pub async fn venue_page<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<VenueDetail, DirectoryError> {
    let v = query::find_venue(db, id)
        .await?
        .ok_or(DirectoryError::not_found(EntityKind::Venue, id))?;
    let shows = query::venue_shows(db, id, now).await?;
    Ok(venue_detail(v, shows))
}

pub async fn artist_page<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<ArtistDetail, DirectoryError> {
    let a = query::find_artist(db, id)
        .await?
        .ok_or(DirectoryError::not_found(EntityKind::Artist, id))?;
    let shows = query::artist_shows(db, id, now).await?;
    Ok(artist_detail(a, shows))
}

pub async fn venues_by_area<C: ConnectionTrait>(
    db: &C,
    now: DateTimeWithTimeZone,
) -> Result<Vec<Area>, DirectoryError> {
    let groups = query::venues_by_location(db).await?;
    let ids: Vec<i32> = groups
        .iter()
        .flat_map(|g| g.venues.iter().map(|v| v.id))
        .collect();
    let upcoming = query::upcoming_counts_by_venue(db, &ids, now).await?;
    Ok(areas(groups, &upcoming))
}

pub async fn venue_search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<venue::Model>, DirectoryError> {
    Ok(query::search_venues(db, term).await?.into())
}

pub async fn artist_search<C: ConnectionTrait>(
    db: &C,
    term: &str,
) -> Result<SearchResults<artist::Model>, DirectoryError> {
    Ok(query::search_artists(db, term).await?.into())
}

pub async fn home<C: ConnectionTrait>(db: &C, limit: u64) -> Result<Home, DirectoryError> {
    Ok(Home {
        recent_venues: query::recent_venues(db, limit).await?,
        recent_artists: query::recent_artists(db, limit).await?,
    })
}

pub async fn artist_list<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<ArtistSummary>, DirectoryError> {
    Ok(query::all_artists(db)
        .await?
        .into_iter()
        .map(ArtistSummary::from)
        .collect())
}

pub async fn show_list<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, DirectoryError> {
    Ok(query::all_shows(db)
        .await?
        .into_iter()
        .map(ShowListing::from)
        .collect())
}

pub async fn venue_edit_form<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<EditForm<VenueForm>, DirectoryError> {
    let v = query::find_venue(db, id)
        .await?
        .ok_or(DirectoryError::not_found(EntityKind::Venue, id))?;
    Ok(EditForm {
        id: v.id,
        form: VenueForm::from(&v),
    })
}

pub async fn artist_edit_form<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<EditForm<ArtistForm>, DirectoryError> {
    let a = query::find_artist(db, id)
        .await?
        .ok_or(DirectoryError::not_found(EntityKind::Artist, id))?;
    Ok(EditForm {
        id: a.id,
        form: ArtistForm::from(&a),
    })
}
