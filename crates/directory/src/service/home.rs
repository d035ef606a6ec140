//! The home page listing.

use db::{repository::{artists, venues}, DbPool};
use tracing::instrument;

use crate::{views::HomePage, DirectoryError, RECENT_LIMIT};

/// The most recently listed venues and artists, newest first.
#[instrument(skip(pool))]
pub async fn home_page(pool: &DbPool) -> Result<HomePage, DirectoryError> {
    let recent_venues = venues::list_recent(pool, RECENT_LIMIT).await?;
    let recent_artists = artists::list_recent(pool, RECENT_LIMIT).await?;

    Ok(HomePage {
        recent_venues: recent_venues.into_iter().map(Into::into).collect(),
        recent_artists: recent_artists.into_iter().map(Into::into).collect(),
    })
}
