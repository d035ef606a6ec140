//! The all-shows page and show creation.

use db::{
    models::ShowRow,
    repository::shows,
    transaction::{begin, settle},
    DbPool,
};
use tracing::{info, instrument, warn};

use crate::{forms::ShowForm, views::ShowListing, DirectoryError};

/// Every show, earliest first.
#[instrument(skip(pool))]
pub async fn list(pool: &DbPool) -> Result<Vec<ShowListing>, DirectoryError> {
    let rows = shows::list_all(pool).await?;
    Ok(rows.into_iter().map(ShowListing::from).collect())
}

/// Validate and insert a show.
///
/// An unknown artist or venue id is refused by the foreign keys and
/// surfaces as a persistence error.
#[instrument(skip(pool))]
pub async fn create(pool: &DbPool, form: &ShowForm) -> Result<ShowRow, DirectoryError> {
    let submission = form.validate().map_err(DirectoryError::Validation)?;

    let mut tx = begin(pool).await?;
    let outcome = shows::insert(
        &mut tx,
        submission.artist_id,
        submission.venue_id,
        submission.start_time,
    )
    .await;
    let show = settle(tx, outcome).await.inspect_err(|err| {
        if err.is_constraint_violation() {
            warn!(
                artist_id = submission.artist_id,
                venue_id = submission.venue_id,
                "show refused by the store: {err}"
            );
        }
    })?;

    info!(id = show.id, "show created");
    Ok(show)
}
