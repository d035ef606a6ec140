//! Tests for the directory operations against an in-memory database.
//!
//! Every test gets a fresh `sqlite::memory:` pool with the migrations
//! applied, and a fixed "now" so show classification is deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};
use db::{pool::memory_pool, DbPool};

use crate::{
    forms::{ArtistForm, ShowForm, VenueForm},
    service::{artists, home, shows, venues},
    DirectoryError, RECENT_LIMIT,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap()
}

fn venue_form(name: &str, city: &str, state: &str, genres: &[&str]) -> VenueForm {
    VenueForm {
        name: name.into(),
        city: city.into(),
        state: state.into(),
        address: "1 Main Street".into(),
        genres: genres.iter().map(|g| g.to_string()).collect::<Vec<_>>().into(),
        ..Default::default()
    }
}

fn artist_form(name: &str, genres: &[&str]) -> ArtistForm {
    ArtistForm {
        name: name.into(),
        city: "Austin".into(),
        state: "TX".into(),
        genres: genres.iter().map(|g| g.to_string()).collect::<Vec<_>>().into(),
        ..Default::default()
    }
}

async fn add_show(pool: &DbPool, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) {
    let form = ShowForm {
        artist_id: Some(artist_id),
        venue_id: Some(venue_id),
        start_time: start_time.to_rfc3339(),
    };
    shows::create(pool, &form).await.expect("show created");
}

async fn show_count(pool: &DbPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ============================================================
// Home page
// ============================================================

#[tokio::test]
async fn home_lists_the_ten_newest_of_each_newest_first() {
    let pool = memory_pool().await.unwrap();
    for i in 0..12 {
        let created = now() - Duration::hours(12 - i);
        venues::create(&pool, &venue_form(&format!("Venue {i}"), "Austin", "TX", &["Jazz"]), created)
            .await
            .unwrap();
        artists::create(&pool, &artist_form(&format!("Artist {i}"), &["Jazz"]), created)
            .await
            .unwrap();
    }

    let page = home::home_page(&pool).await.unwrap();
    assert_eq!(page.recent_venues.len(), RECENT_LIMIT as usize);
    assert_eq!(page.recent_artists.len(), RECENT_LIMIT as usize);

    let names: Vec<&str> = page.recent_venues.iter().map(|v| v.name.as_str()).collect();
    let expected: Vec<String> = (2..12).rev().map(|i| format!("Venue {i}")).collect();
    assert_eq!(names, expected);
    assert!(page
        .recent_artists
        .windows(2)
        .all(|w| w[0].created_date >= w[1].created_date));
}

// ============================================================
// Listings and search
// ============================================================

#[tokio::test]
async fn venues_are_grouped_by_location_with_upcoming_counts() {
    let pool = memory_pool().await.unwrap();
    let hop = venues::create(&pool, &venue_form("The Musical Hop", "San Francisco", "CA", &["Jazz"]), now())
        .await
        .unwrap();
    venues::create(&pool, &venue_form("Park Square", "San Francisco", "CA", &["Jazz"]), now())
        .await
        .unwrap();
    venues::create(&pool, &venue_form("The Dueling Pianos Bar", "New York", "NY", &["Pop"]), now())
        .await
        .unwrap();
    let artist = artists::create(&pool, &artist_form("Guns N Petals", &["Rock n Roll"]), now())
        .await
        .unwrap();

    add_show(&pool, artist, hop, now() + Duration::days(3)).await;
    add_show(&pool, artist, hop, now() + Duration::days(4)).await;
    add_show(&pool, artist, hop, now()).await;

    let areas = venues::list_areas(&pool, now()).await.unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("San Francisco", "CA"));
    assert_eq!((areas[1].city.as_str(), areas[1].state.as_str()), ("New York", "NY"));

    let hop_hit = areas[0].venues.iter().find(|v| v.id == hop).unwrap();
    assert_eq!(hop_hit.num_upcoming_shows, 2);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let pool = memory_pool().await.unwrap();
    venues::create(&pool, &venue_form("The Blue Note", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    venues::create(&pool, &venue_form("Red Room", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    venues::create(&pool, &venue_form("BLUEBIRD CAFE", "Nashville", "TN", &["Country"]), now())
        .await
        .unwrap();

    let results = venues::search(&pool, "blue", now()).await.unwrap();
    let names: Vec<&str> = results.data.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(results.count, 2);
    assert_eq!(names, vec!["BLUEBIRD CAFE", "The Blue Note"]);
    assert_eq!(results.search_term, "blue");
}

#[tokio::test]
async fn search_ignores_case_beyond_ascii() {
    let pool = memory_pool().await.unwrap();
    venues::create(&pool, &venue_form("Café Éclair", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    venues::create(&pool, &venue_form("ÜBERBAR", "Austin", "TX", &["Rock n Roll"]), now())
        .await
        .unwrap();
    artists::create(&pool, &artist_form("Zoë Ångström", &["Folk"]), now())
        .await
        .unwrap();

    let eclair = venues::search(&pool, "éclair", now()).await.unwrap();
    assert_eq!(eclair.count, 1);
    assert_eq!(eclair.data[0].name, "Café Éclair");

    let uber = venues::search(&pool, "überbar", now()).await.unwrap();
    assert_eq!(uber.count, 1);
    assert_eq!(uber.data[0].name, "ÜBERBAR");

    let zoe = artists::search(&pool, "ZOË ÅNG", now()).await.unwrap();
    assert_eq!(zoe.count, 1);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let pool = memory_pool().await.unwrap();
    artists::create(&pool, &artist_form("100% Funk", &["Funk"]), now())
        .await
        .unwrap();
    artists::create(&pool, &artist_form("Funk Brothers", &["Funk"]), now())
        .await
        .unwrap();

    let percent = artists::search(&pool, "%", now()).await.unwrap();
    assert_eq!(percent.count, 1);
    assert_eq!(percent.data[0].name, "100% Funk");

    let underscore = artists::search(&pool, "_", now()).await.unwrap();
    assert_eq!(underscore.count, 0);

    let everyone = artists::search(&pool, "", now()).await.unwrap();
    assert_eq!(everyone.count, 2);
}

#[tokio::test]
async fn search_counts_only_upcoming_shows() {
    let pool = memory_pool().await.unwrap();
    let venue = venues::create(&pool, &venue_form("Stage", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let artist = artists::create(&pool, &artist_form("Matt Quevedo", &["Jazz"]), now())
        .await
        .unwrap();
    add_show(&pool, artist, venue, now() - Duration::days(1)).await;
    add_show(&pool, artist, venue, now() + Duration::days(1)).await;

    let results = artists::search(&pool, "quevedo", now()).await.unwrap();
    assert_eq!(results.data[0].num_upcoming_shows, 1);

    let listed = artists::list(&pool, now()).await.unwrap();
    assert_eq!(listed[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn shows_are_listed_earliest_first_with_names() {
    let pool = memory_pool().await.unwrap();
    let venue = venues::create(&pool, &venue_form("The Musical Hop", "San Francisco", "CA", &["Jazz"]), now())
        .await
        .unwrap();
    let early = artists::create(&pool, &artist_form("Early Bird", &["Folk"]), now())
        .await
        .unwrap();
    let late = artists::create(&pool, &artist_form("Night Owl", &["Soul"]), now())
        .await
        .unwrap();
    add_show(&pool, late, venue, now() + Duration::days(2)).await;
    add_show(&pool, early, venue, now() - Duration::days(2)).await;

    let listing = shows::list(&pool).await.unwrap();
    let performers: Vec<&str> = listing.iter().map(|s| s.artist_name.as_str()).collect();
    assert_eq!(performers, vec!["Early Bird", "Night Owl"]);
    assert!(listing.iter().all(|s| s.venue_name == "The Musical Hop"));
}

// ============================================================
// Detail pages
// ============================================================

#[tokio::test]
async fn created_venue_round_trips_its_genres() {
    let pool = memory_pool().await.unwrap();
    let id = venues::create(&pool, &venue_form("The Blue Note", "Austin", "TX", &["jazz", "Blues"]), now())
        .await
        .unwrap();

    let detail = venues::detail(&pool, id, now()).await.unwrap();
    assert_eq!(detail.name, "The Blue Note");
    assert_eq!(detail.genres, vec!["Blues", "Jazz"]);
    assert_eq!(detail.created_date, now());
}

#[tokio::test]
async fn detail_splits_shows_at_now() {
    let pool = memory_pool().await.unwrap();
    let venue = venues::create(&pool, &venue_form("Stage", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let artist = artists::create(&pool, &artist_form("The Wild Sax Band", &["Jazz"]), now())
        .await
        .unwrap();
    add_show(&pool, artist, venue, now() - Duration::days(10)).await;
    add_show(&pool, artist, venue, now()).await;
    add_show(&pool, artist, venue, now() + Duration::seconds(1)).await;

    let venue_page = venues::detail(&pool, venue, now()).await.unwrap();
    assert_eq!(venue_page.past_shows_count, 2);
    assert_eq!(venue_page.upcoming_shows_count, 1);
    assert_eq!(venue_page.upcoming_shows[0].artist_name, "The Wild Sax Band");
    assert_eq!(venue_page.upcoming_shows[0].start_time, now() + Duration::seconds(1));

    let artist_page = artists::detail(&pool, artist, now()).await.unwrap();
    assert_eq!(artist_page.past_shows_count, 2);
    assert_eq!(artist_page.upcoming_shows[0].venue_name, "Stage");
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let pool = memory_pool().await.unwrap();
    assert!(matches!(
        venues::detail(&pool, 42, now()).await,
        Err(DirectoryError::NotFound { entity: "venue", id: 42 })
    ));
    assert!(matches!(
        artists::edit_form(&pool, 42).await,
        Err(DirectoryError::NotFound { entity: "artist", id: 42 })
    ));
    assert!(matches!(
        venues::update(&pool, 42, &venue_form("Ghost", "Austin", "TX", &["Jazz"])).await,
        Err(DirectoryError::NotFound { .. })
    ));
    assert!(matches!(
        artists::delete(&pool, 42).await,
        Err(DirectoryError::NotFound { .. })
    ));
}

// ============================================================
// Mutations
// ============================================================

#[tokio::test]
async fn invalid_form_writes_nothing() {
    let pool = memory_pool().await.unwrap();
    let result = venues::create(&pool, &venue_form("", "Austin", "TX", &["Jazz"]), now()).await;
    match result {
        Err(DirectoryError::Validation(errors)) => {
            assert_eq!(errors["name"], vec!["This field is required."]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(venues::list_areas(&pool, now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_overwrites_fields_and_replaces_genres() {
    let pool = memory_pool().await.unwrap();
    let id = artists::create(&pool, &artist_form("Matt Quevedo", &["Jazz", "Blues"]), now())
        .await
        .unwrap();

    let mut form = artists::edit_form(&pool, id).await.unwrap();
    assert_eq!(form.name, "Matt Quevedo");
    form.name = "Matt Quevedo Trio".into();
    form.phone = "300-400-5000".into();
    form.seeking_venue = true;
    form.genres = vec!["Soul".to_string()].into();
    artists::update(&pool, id, &form).await.unwrap();

    let later = now() + Duration::days(1);
    let detail = artists::detail(&pool, id, later).await.unwrap();
    assert_eq!(detail.name, "Matt Quevedo Trio");
    assert_eq!(detail.phone.as_deref(), Some("300-400-5000"));
    assert!(detail.seeking_venue);
    assert_eq!(detail.genres, vec!["Soul"]);
    assert_eq!(detail.created_date, now());
}

#[tokio::test]
async fn deleting_a_venue_cascades_to_its_shows() {
    let pool = memory_pool().await.unwrap();
    let doomed = venues::create(&pool, &venue_form("Doomed Hall", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let kept = venues::create(&pool, &venue_form("Kept Hall", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let artist = artists::create(&pool, &artist_form("Touring Act", &["Pop"]), now())
        .await
        .unwrap();
    add_show(&pool, artist, doomed, now() + Duration::days(1)).await;
    add_show(&pool, artist, doomed, now() - Duration::days(1)).await;
    add_show(&pool, artist, kept, now() + Duration::days(2)).await;

    let name = venues::delete(&pool, doomed).await.unwrap();
    assert_eq!(name, "Doomed Hall");
    assert_eq!(show_count(&pool).await, 1);

    let artist_page = artists::detail(&pool, artist, now()).await.unwrap();
    assert_eq!(artist_page.upcoming_shows_count, 1);
    assert_eq!(artist_page.upcoming_shows[0].venue_id, kept);
    assert!(matches!(
        venues::detail(&pool, doomed, now()).await,
        Err(DirectoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn failed_delete_reports_the_name_and_keeps_the_row() {
    let pool = memory_pool().await.unwrap();
    let venue = venues::create(&pool, &venue_form("Fortress", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let artist = artists::create(&pool, &artist_form("Resident", &["Jazz"]), now())
        .await
        .unwrap();
    add_show(&pool, artist, venue, now() + Duration::days(1)).await;
    sqlx::query(
        "CREATE TRIGGER keep_venues BEFORE DELETE ON venues \
         BEGIN SELECT RAISE(ABORT, 'venues are locked'); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    match venues::delete(&pool, venue).await {
        Err(DirectoryError::DeleteFailed { entity, name, .. }) => {
            assert_eq!(entity, "venue");
            assert_eq!(name, "Fortress");
        }
        other => panic!("expected DeleteFailed, got {other:?}"),
    }
    assert_eq!(venues::detail(&pool, venue, now()).await.unwrap().name, "Fortress");
    assert_eq!(show_count(&pool).await, 1);
}

#[tokio::test]
async fn show_for_unknown_artist_is_rolled_back() {
    let pool = memory_pool().await.unwrap();
    let venue = venues::create(&pool, &venue_form("Stage", "Austin", "TX", &["Jazz"]), now())
        .await
        .unwrap();
    let form = ShowForm {
        artist_id: Some(999),
        venue_id: Some(venue),
        start_time: "2030-07-01 20:00".into(),
    };

    assert!(matches!(
        shows::create(&pool, &form).await,
        Err(DirectoryError::Persistence(_))
    ));
    assert_eq!(show_count(&pool).await, 0);
}
