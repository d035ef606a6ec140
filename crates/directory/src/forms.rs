//! Submitted forms and their validation.
//!
//! Forms deserialize leniently: missing fields take their defaults so that
//! validation, not the extractor, decides what is wrong and can report every
//! problem at once. `validate()` either yields the typed columns to write or
//! the per-field messages.

use chrono::{DateTime, NaiveDateTime, Utc};
use db::models::{ArtistFields, ArtistRow, VenueFields, VenueRow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::genres::{normalize_genres, parse_encoded_genres};

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").expect("phone pattern"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/?#]+\.[^\s/?#]+(?:[/?#]\S*)?$").expect("url pattern"));
static FACEBOOK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.|m\.)?facebook\.com(?:/\S*)?$").expect("facebook pattern")
});

/// US state codes accepted for venues and artists.
pub const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const NAME_MAX: usize = 120;
const TEXT_MAX: usize = 120;
const LINK_MAX: usize = 500;
const DESCRIPTION_MAX: usize = 300;

const REQUIRED: &str = "This field is required.";

/// Genres as submitted: a proper list, or a legacy inline encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenresInput {
    List(Vec<String>),
    Encoded(String),
}

impl Default for GenresInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<Vec<String>> for GenresInput {
    fn from(names: Vec<String>) -> Self {
        Self::List(names)
    }
}

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// The venue create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: GenresInput,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// A venue submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSubmission {
    pub fields: VenueFields,
    pub genres: Vec<String>,
}

impl VenueForm {
    /// Prefill the edit form from a stored venue.
    pub fn from_row(row: &VenueRow, genres: Vec<String>) -> Self {
        Self {
            name: row.name.clone(),
            city: row.city.clone(),
            state: row.state.clone(),
            address: row.address.clone(),
            phone: row.phone.clone().unwrap_or_default(),
            image_link: row.image_link.clone().unwrap_or_default(),
            genres: GenresInput::List(genres),
            facebook_link: row.facebook_link.clone().unwrap_or_default(),
            website: row.website.clone().unwrap_or_default(),
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueSubmission, FieldErrors> {
        let mut check = Checker::default();
        let fields = VenueFields {
            name: check.required("name", &self.name, NAME_MAX),
            city: check.required("city", &self.city, TEXT_MAX),
            state: check.state(&self.state),
            address: check.required("address", &self.address, TEXT_MAX),
            phone: check.phone(&self.phone),
            image_link: check.link("image_link", &self.image_link, &URL_RE),
            facebook_link: check.link("facebook_link", &self.facebook_link, &FACEBOOK_RE),
            website: check.link("website", &self.website, &URL_RE),
            seeking_talent: self.seeking_talent,
            seeking_description: check.optional(
                "seeking_description",
                &self.seeking_description,
                DESCRIPTION_MAX,
            ),
        };
        let genres = check.genres(&self.genres);
        check.finish(VenueSubmission { fields, genres })
    }
}

// ---------------------------------------------------------------------------
// Artist
// ---------------------------------------------------------------------------

/// The artist create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: GenresInput,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// An artist submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistSubmission {
    pub fields: ArtistFields,
    pub genres: Vec<String>,
}

impl ArtistForm {
    /// Prefill the edit form from a stored artist.
    pub fn from_row(row: &ArtistRow, genres: Vec<String>) -> Self {
        Self {
            name: row.name.clone(),
            city: row.city.clone(),
            state: row.state.clone(),
            phone: row.phone.clone().unwrap_or_default(),
            image_link: row.image_link.clone().unwrap_or_default(),
            genres: GenresInput::List(genres),
            facebook_link: row.facebook_link.clone().unwrap_or_default(),
            website: row.website.clone().unwrap_or_default(),
            seeking_venue: row.seeking_venue,
            seeking_description: row.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistSubmission, FieldErrors> {
        let mut check = Checker::default();
        let fields = ArtistFields {
            name: check.required("name", &self.name, NAME_MAX),
            city: check.required("city", &self.city, TEXT_MAX),
            state: check.state(&self.state),
            phone: check.phone(&self.phone),
            image_link: check.link("image_link", &self.image_link, &URL_RE),
            facebook_link: check.link("facebook_link", &self.facebook_link, &FACEBOOK_RE),
            website: check.link("website", &self.website, &URL_RE),
            seeking_venue: self.seeking_venue,
            seeking_description: check.optional(
                "seeking_description",
                &self.seeking_description,
                DESCRIPTION_MAX,
            ),
        };
        let genres = check.genres(&self.genres);
        check.finish(ArtistSubmission { fields, genres })
    }
}

// ---------------------------------------------------------------------------
// Show
// ---------------------------------------------------------------------------

/// The show creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub start_time: String,
}

/// A show submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowSubmission {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    /// An empty form whose start time defaults to `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            artist_id: None,
            venue_id: None,
            start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn validate(&self) -> Result<ShowSubmission, FieldErrors> {
        let mut check = Checker::default();
        let artist_id = check.id("artist_id", self.artist_id);
        let venue_id = check.id("venue_id", self.venue_id);
        let start_time = check.start_time(&self.start_time);
        check.finish(ShowSubmission {
            artist_id,
            venue_id,
            start_time: start_time.unwrap_or_default(),
        })
    }
}

/// Accept RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` (with a space or `T`)
/// read as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_default().push(message.into());
    }

    fn too_long(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, format!("Field cannot be longer than {max} characters."));
        }
    }

    fn required(&mut self, field: &str, value: &str, max: usize) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, REQUIRED);
        }
        self.too_long(field, value, max);
        value.to_string()
    }

    fn optional(&mut self, field: &str, value: &str, max: usize) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.too_long(field, value, max);
        Some(value.to_string())
    }

    fn state(&mut self, value: &str) -> String {
        let code = value.trim().to_ascii_uppercase();
        if code.is_empty() {
            self.push("state", REQUIRED);
        } else if !STATE_CODES.contains(&code.as_str()) {
            self.push("state", "Not a valid choice.");
        }
        code
    }

    fn phone(&mut self, value: &str) -> Option<String> {
        let phone = self.optional("phone", value, TEXT_MAX)?;
        if !PHONE_RE.is_match(&phone) {
            self.push("phone", "Invalid phone number, expected NNN-NNN-NNNN.");
        }
        Some(phone)
    }

    fn link(&mut self, field: &str, value: &str, pattern: &Regex) -> Option<String> {
        let link = self.optional(field, value, LINK_MAX)?;
        if !pattern.is_match(&link) {
            let message = if field == "facebook_link" {
                "Invalid URL, expected a facebook.com link."
            } else {
                "Invalid URL."
            };
            self.push(field, message);
        }
        Some(link)
    }

    fn genres(&mut self, input: &GenresInput) -> Vec<String> {
        let names = match input {
            GenresInput::List(names) => names.clone(),
            GenresInput::Encoded(encoded) => match parse_encoded_genres(encoded) {
                Ok(names) => names,
                Err(err) => {
                    self.push("genres", format!("Invalid genre list: {err}."));
                    return Vec::new();
                }
            },
        };

        if names.iter().all(|n| n.trim().is_empty()) {
            self.push("genres", REQUIRED);
            return Vec::new();
        }

        match normalize_genres(&names) {
            Ok(genres) => genres,
            Err(unknown) => {
                self.push("genres", format!("Not a valid choice: {}.", unknown.join(", ")));
                Vec::new()
            }
        }
    }

    fn id(&mut self, field: &str, value: Option<i64>) -> i64 {
        match value {
            Some(id) if id > 0 => id,
            Some(_) => {
                self.push(field, "Must be a positive id.");
                0
            }
            None => {
                self.push(field, REQUIRED);
                0
            }
        }
    }

    fn start_time(&mut self, value: &str) -> Option<DateTime<Utc>> {
        if value.trim().is_empty() {
            self.push("start_time", REQUIRED);
            return None;
        }
        let parsed = parse_start_time(value);
        if parsed.is_none() {
            self.push("start_time", "Not a valid datetime value.");
        }
        parsed
    }

    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn blue_note() -> VenueForm {
        VenueForm {
            name: "The Blue Note".into(),
            city: "Austin".into(),
            state: "tx".into(),
            address: "1 Congress Ave".into(),
            genres: vec!["jazz".to_string()].into(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_venue_is_accepted_and_normalised() {
        let submission = blue_note().validate().expect("valid venue");
        assert_eq!(submission.fields.state, "TX");
        assert_eq!(submission.fields.phone, None);
        assert_eq!(submission.genres, vec!["Jazz"]);
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let form = VenueForm {
            state: "ZZ".into(),
            phone: "5551234".into(),
            website: "not a url".into(),
            facebook_link: "https://example.com/page".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["address", "city", "facebook_link", "genres", "name", "phone", "state", "website"]
        );
        assert_eq!(errors["state"], vec!["Not a valid choice."]);
    }

    #[test]
    fn encoded_genres_are_decoded_strictly() {
        let mut form = blue_note();
        form.genres = GenresInput::Encoded("['Jazz', 'blues']".into());
        assert_eq!(form.validate().unwrap().genres, vec!["Jazz", "Blues"]);

        form.genres = GenresInput::Encoded("eval('x')".into());
        let errors = form.validate().unwrap_err();
        assert!(errors["genres"][0].starts_with("Invalid genre list"));
    }

    #[test]
    fn unknown_genres_are_named() {
        let mut form = blue_note();
        form.genres = vec!["Jazz".to_string(), "Polka".to_string()].into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["genres"], vec!["Not a valid choice: Polka."]);
    }

    #[test]
    fn genres_deserialize_from_list_or_string() {
        let list: VenueForm = serde_json::from_str(r#"{"genres": ["Jazz"]}"#).unwrap();
        assert_eq!(list.genres, GenresInput::List(vec!["Jazz".into()]));
        let encoded: VenueForm = serde_json::from_str(r#"{"genres": "{Jazz}"}"#).unwrap();
        assert_eq!(encoded.genres, GenresInput::Encoded("{Jazz}".into()));
    }

    #[test]
    fn links_and_phone_accept_good_values() {
        let mut form = blue_note();
        form.phone = "512-555-0100".into();
        form.website = "https://bluenote.example.com/".into();
        form.facebook_link = "https://www.facebook.com/bluenote".into();
        form.image_link = "http://img.example.com/a.png".into();
        let fields = form.validate().unwrap().fields;
        assert_eq!(fields.phone.as_deref(), Some("512-555-0100"));
        assert_eq!(fields.facebook_link.as_deref(), Some("https://www.facebook.com/bluenote"));
    }

    #[test]
    fn artist_form_requires_name_city_state_and_genres() {
        let errors = ArtistForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["city", "genres", "name", "state"]);
    }

    #[test]
    fn show_form_parses_both_time_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 30, 0).unwrap();
        for start_time in ["2035-04-01 20:30:00", "2035-04-01T20:30", "2035-04-01T22:30:00+02:00"] {
            let form = ShowForm {
                artist_id: Some(1),
                venue_id: Some(2),
                start_time: start_time.into(),
            };
            assert_eq!(form.validate().unwrap().start_time, expected, "{start_time}");
        }
    }

    #[test]
    fn show_form_rejects_missing_ids_and_bad_time() {
        let form = ShowForm {
            artist_id: None,
            venue_id: Some(-3),
            start_time: "next tuesday".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["artist_id"], vec![REQUIRED]);
        assert_eq!(errors["venue_id"], vec!["Must be a positive id."]);
        assert_eq!(errors["start_time"], vec!["Not a valid datetime value."]);
    }

    #[test]
    fn blank_show_form_defaults_start_time() {
        let now = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(ShowForm::blank(now).start_time, "2030-01-02 03:04:05");
    }
}
