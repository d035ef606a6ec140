//! Directory operations — one function per page or mutation.
//!
//! Every function takes the shared `&DbPool` and acquires connections only
//! for as long as it needs them. Mutations validate first, then run all of
//! their writes in one transaction settled by `db::transaction::settle`.
//! "Now" is passed in by the caller so a request classifies every show
//! against the same instant.

pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

/// How many venues and artists the home page lists.
pub const RECENT_LIMIT: i64 = 10;
