//! Repository functions — one function per database operation.
//!
//! Reads take a `&DbPool`; writes take `&mut SqliteConnection` so they run
//! inside the caller's transaction. Every function returns
//! `Result<T, DbError>`. No business logic, no view types.
//!
//! Timestamps are stored as RFC 3339 text in UTC, which sorts and compares
//! chronologically as plain strings.

pub mod venues;
pub mod artists;
pub mod shows;
pub mod genres;

/// True when `name` contains `term`, ignoring case.
///
/// Both sides are lowercased with Unicode rules, so `éclair` finds
/// `Café Éclair`. The term is matched literally; an empty term matches
/// every name.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
