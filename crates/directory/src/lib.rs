//! `directory` crate — the booking directory's domain layer.
//!
//! Validates submitted forms, decodes genre lists, assembles view models
//! from `db` rows, and exposes one service function per page or mutation.

pub mod error;
pub mod forms;
pub mod genres;
pub mod seed;
pub mod service;
pub mod views;

pub use error::{DirectoryError, FieldErrors};
pub use forms::{ArtistForm, GenresInput, ShowForm, VenueForm};
pub use service::RECENT_LIMIT;

#[cfg(test)]
mod service_tests;
