//! Loading a JSON fixture of venues, artists and shows.
//!
//! Entries go through the same create operations as form submissions, so
//! they are validated the same way and legacy encoded genre strings are
//! accepted. Shows name their artist and venue; names resolve against the
//! entries created by the same fixture.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::DbPool;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    error::summarize,
    forms::{ArtistForm, ShowForm, VenueForm},
    service, DirectoryError,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub venues: Vec<VenueForm>,
    pub artists: Vec<ArtistForm>,
    pub shows: Vec<SeedShow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedShow {
    pub artist: String,
    pub venue: String,
    pub start_time: String,
}

/// How many rows of each kind were created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} #{index} ({name}) is invalid: {}", summarize(.errors))]
    Invalid {
        kind: &'static str,
        index: usize,
        name: String,
        errors: crate::FieldErrors,
    },

    #[error("show #{index} names unknown {kind} '{name}'")]
    UnknownReference {
        kind: &'static str,
        index: usize,
        name: String,
    },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl SeedFile {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Create every entry of `file`, stopping at the first failure.
///
/// Each entry is committed on its own; entries created before a failure stay.
pub async fn load(pool: &DbPool, file: &SeedFile, now: DateTime<Utc>) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    let mut venue_ids: HashMap<&str, i64> = HashMap::new();
    let mut artist_ids: HashMap<&str, i64> = HashMap::new();

    for (index, form) in file.venues.iter().enumerate() {
        let id = service::venues::create(pool, form, now)
            .await
            .map_err(|err| invalid("venue", index, &form.name, err))?;
        venue_ids.insert(form.name.trim(), id);
        report.venues += 1;
    }

    for (index, form) in file.artists.iter().enumerate() {
        let id = service::artists::create(pool, form, now)
            .await
            .map_err(|err| invalid("artist", index, &form.name, err))?;
        artist_ids.insert(form.name.trim(), id);
        report.artists += 1;
    }

    for (index, show) in file.shows.iter().enumerate() {
        let artist_id = *artist_ids.get(show.artist.trim()).ok_or_else(|| SeedError::UnknownReference {
            kind: "artist",
            index,
            name: show.artist.clone(),
        })?;
        let venue_id = *venue_ids.get(show.venue.trim()).ok_or_else(|| SeedError::UnknownReference {
            kind: "venue",
            index,
            name: show.venue.clone(),
        })?;
        let form = ShowForm {
            artist_id: Some(artist_id),
            venue_id: Some(venue_id),
            start_time: show.start_time.clone(),
        };
        service::shows::create(pool, &form)
            .await
            .map_err(|err| invalid("show", index, &show.artist, err))?;
        report.shows += 1;
    }

    info!(
        venues = report.venues,
        artists = report.artists,
        shows = report.shows,
        "seed loaded"
    );
    Ok(report)
}

fn invalid(kind: &'static str, index: usize, name: &str, err: DirectoryError) -> SeedError {
    match err {
        DirectoryError::Validation(errors) => SeedError::Invalid {
            kind,
            index,
            name: name.to_string(),
            errors,
        },
        other => SeedError::Directory(other),
    }
}
