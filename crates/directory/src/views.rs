//! View models handed to the page layer, and the functions that assemble
//! them from `db` rows.
//!
//! Each DTO enumerates exactly the fields a page shows; nothing is copied
//! from rows by reflection.

use chrono::{DateTime, Utc};
use db::models::{
    ArtistRow, CounterpartShowRow, LocatedVenueRow, ShowListingRow, UpcomingCountRow, VenueRow,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A venue or artist in a list, with how many shows it still has ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<UpcomingCountRow> for EntityHit {
    fn from(row: UpcomingCountRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        }
    }
}

/// All venues sharing one (city, state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntityHit>,
}

/// Fold rows ordered by (state, city) into one [`Area`] per location.
pub fn group_areas(rows: Vec<LocatedVenueRow>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    for row in rows {
        let hit = EntityHit {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };
        match areas.last_mut() {
            Some(area) if area.city == row.city && area.state == row.state => area.venues.push(hit),
            _ => areas.push(Area {
                city: row.city,
                state: row.state,
                venues: vec![hit],
            }),
        }
    }
    areas
}

/// The result page of a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<EntityHit>,
}

impl SearchResults {
    pub fn new(search_term: impl Into<String>, rows: Vec<UpcomingCountRow>) -> Self {
        let data: Vec<EntityHit> = rows.into_iter().map(EntityHit::from).collect();
        Self {
            search_term: search_term.into(),
            count: data.len(),
            data,
        }
    }
}

/// One row of the all-shows page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<ShowListingRow> for ShowListing {
    fn from(row: ShowListingRow) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

/// A recently listed venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub image_link: Option<String>,
    pub created_date: DateTime<Utc>,
}

impl From<VenueRow> for RecentEntry {
    fn from(row: VenueRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            image_link: row.image_link,
            created_date: row.created_date,
        }
    }
}

impl From<ArtistRow> for RecentEntry {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            image_link: row.image_link,
            created_date: row.created_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    pub recent_venues: Vec<RecentEntry>,
    pub recent_artists: Vec<RecentEntry>,
}

// ---------------------------------------------------------------------------
// Detail pages
// ---------------------------------------------------------------------------

/// A show on a venue page: who plays, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<CounterpartShowRow> for VenueShow {
    fn from(row: CounterpartShowRow) -> Self {
        Self {
            artist_id: row.counterpart_id,
            artist_name: row.counterpart_name,
            artist_image_link: row.counterpart_image_link,
            start_time: row.start_time,
        }
    }
}

/// A show on an artist page: where, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<CounterpartShowRow> for ArtistShow {
    fn from(row: CounterpartShowRow) -> Self {
        Self {
            venue_id: row.counterpart_id,
            venue_name: row.counterpart_name,
            venue_image_link: row.counterpart_image_link,
            start_time: row.start_time,
        }
    }
}

/// Split shows into (past, upcoming) relative to `now`.
///
/// A show starting exactly at `now` is past. Input order is kept on each side.
pub fn partition_shows<T>(shows: Vec<CounterpartShowRow>, now: DateTime<Utc>) -> (Vec<T>, Vec<T>)
where
    T: From<CounterpartShowRow>,
{
    let (upcoming, past): (Vec<_>, Vec<_>) =
        shows.into_iter().partition(|show| show.start_time > now);
    (
        past.into_iter().map(T::from).collect(),
        upcoming.into_iter().map(T::from).collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetail {
    pub id: i64,
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
    pub created_date: DateTime<Utc>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn assemble(
        row: VenueRow,
        genres: Vec<String>,
        shows: Vec<CounterpartShowRow>,
        now: DateTime<Utc>,
    ) -> Self {
        let (past_shows, upcoming_shows) = partition_shows::<VenueShow>(shows, now);
        Self {
            id: row.id,
            name: row.name,
            genres,
            address: row.address,
            city: row.city,
            state: row.state,
            phone: row.phone,
            website: row.website,
            facebook_link: row.facebook_link,
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description,
            image_link: row.image_link,
            created_date: row.created_date,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDetail {
    pub id: i64,
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
    pub created_date: DateTime<Utc>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn assemble(
        row: ArtistRow,
        genres: Vec<String>,
        shows: Vec<CounterpartShowRow>,
        now: DateTime<Utc>,
    ) -> Self {
        let (past_shows, upcoming_shows) = partition_shows::<ArtistShow>(shows, now);
        Self {
            id: row.id,
            name: row.name,
            genres,
            city: row.city,
            state: row.state,
            phone: row.phone,
            website: row.website,
            facebook_link: row.facebook_link,
            seeking_venue: row.seeking_venue,
            seeking_description: row.seeking_description,
            image_link: row.image_link,
            created_date: row.created_date,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}
