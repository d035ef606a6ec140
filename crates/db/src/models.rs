//! Row structs that map onto database tables and joined queries.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! View models live in the `directory` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// venues
// ---------------------------------------------------------------------------

/// A persisted venue row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VenueRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Every mutable venue column, as written by insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

// ---------------------------------------------------------------------------
// artists
// ---------------------------------------------------------------------------

/// A persisted artist row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArtistRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Every mutable artist column, as written by insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

// ---------------------------------------------------------------------------
// listing / search projections
// ---------------------------------------------------------------------------

/// A venue or artist with the number of shows still ahead of it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UpcomingCountRow {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A venue with its location and upcoming-show count, used for area grouping.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocatedVenueRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

// ---------------------------------------------------------------------------
// shows
// ---------------------------------------------------------------------------

/// A persisted show row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowRow {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show joined with the names needed to list it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShowListingRow {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show seen from one side: the other party's id, name and image.
///
/// On a venue page the counterpart is the artist; on an artist page, the venue.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CounterpartShowRow {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// genres
// ---------------------------------------------------------------------------

/// A persisted genre row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GenreRow {
    pub id: i64,
    pub name: String,
}
