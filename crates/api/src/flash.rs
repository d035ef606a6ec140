//! The user-visible flash messages.

use directory::{error::summarize, FieldErrors};

/// Shown when a page's data could not be loaded.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

pub const SHOW_CREATED: &str = "Show was successfully created!";
pub const SHOW_CREATE_FAILED: &str = "An error occurred. Show could not be created.";

/// `Venue The Blue Note`, or just `Venue` when the name is unknown.
fn subject(kind: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        kind.to_string()
    } else {
        format!("{kind} {name}")
    }
}

pub fn created(kind: &str, name: &str) -> String {
    format!("{} was successfully created!", subject(kind, name))
}

pub fn create_failed(kind: &str, name: &str) -> String {
    format!("An error occurred. {} could not be created.", subject(kind, name))
}

pub fn updated(kind: &str, name: &str) -> String {
    format!("{} was successfully updated!", subject(kind, name))
}

pub fn update_failed(kind: &str, name: &str) -> String {
    format!("An error occurred. {} could not be updated.", subject(kind, name))
}

pub fn deleted(kind: &str, name: &str) -> String {
    format!("{} was successfully deleted!", subject(kind, name))
}

pub fn delete_failed(kind: &str, name: &str) -> String {
    format!("An error occurred. {} could not be deleted.", subject(kind, name))
}

pub fn invalid(errors: &FieldErrors) -> String {
    format!("Errors: {}", summarize(errors))
}
