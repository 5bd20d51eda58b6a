// Field validation for category and event submissions
//
// Required fields are checked after trimming, so whitespace-only input is
// treated as empty. Size limits are last-resort guards against abuse and are
// not configurable.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::event::EventFields;

// =============================================================================
// Limits
// =============================================================================

/// Maximum size for a name (category or event).
pub const MAX_NAME_BYTES: usize = 2 * 1024; // 2 KB

/// Maximum size for a description (category or event).
pub const MAX_DESCRIPTION_BYTES: usize = 10 * 1024; // 10 KB

/// Maximum size for the free-form event date.
pub const MAX_DATE_BYTES: usize = 128;

/// Maximum size for an event location.
pub const MAX_LOCATION_BYTES: usize = 1024; // 1 KB

/// Minimum number of characters in an event name.
pub const MIN_EVENT_NAME_CHARS: usize = 3;

/// Minimum number of characters in an event location.
pub const MIN_EVENT_LOCATION_CHARS: usize = 5;

// =============================================================================
// Error types
// =============================================================================

/// A single violated field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FieldError {
    /// Name of the offending form field.
    #[cfg_attr(feature = "openapi", schema(example = "name"))]
    pub field: String,
    /// Human-readable message for the form.
    #[cfg_attr(feature = "openapi", schema(example = "Name cannot be empty"))]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

// =============================================================================
// Form descriptors
// =============================================================================

/// Rules a client form must satisfy for one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FormField {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    pub max_bytes: usize,
}

impl FormField {
    fn required(name: &str, min_length: Option<usize>, max_bytes: usize) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            min_length,
            max_bytes,
        }
    }
}

/// Fields of the category submission form.
pub fn category_form() -> Vec<FormField> {
    vec![
        FormField::required("name", None, MAX_NAME_BYTES),
        FormField::required("description", None, MAX_DESCRIPTION_BYTES),
    ]
}

/// Fields of the event submission and edit forms.
pub fn event_form() -> Vec<FormField> {
    vec![
        FormField::required("name", Some(MIN_EVENT_NAME_CHARS), MAX_NAME_BYTES),
        FormField::required("description", None, MAX_DESCRIPTION_BYTES),
        FormField::required("date", None, MAX_DATE_BYTES),
        FormField::required("location", Some(MIN_EVENT_LOCATION_CHARS), MAX_LOCATION_BYTES),
    ]
}

// =============================================================================
// Validation functions
// =============================================================================

fn check_required(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, message);
        return false;
    }
    true
}

fn check_max_bytes(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) -> bool {
    if value.len() > max {
        errors.push(field, format!("{} exceeds allowed limits", capitalize(field)));
        return false;
    }
    true
}

fn check_min_chars(errors: &mut ValidationErrors, field: &str, value: &str, min: usize) {
    if value.trim().chars().count() < min {
        errors.push(
            field,
            format!("{} must be at least {} characters long", capitalize(field), min),
        );
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validate a category submission.
pub fn check_category(name: &str, description: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if check_required(&mut errors, "name", name, "Name cannot be empty") {
        check_max_bytes(&mut errors, "name", name, MAX_NAME_BYTES);
    }
    if check_required(&mut errors, "description", description, "Description cannot be empty") {
        check_max_bytes(&mut errors, "description", description, MAX_DESCRIPTION_BYTES);
    }

    errors
}

/// Validate event fields for create and edit.
pub fn check_event_fields(fields: &EventFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if check_required(&mut errors, "name", &fields.name, "Name cannot be empty")
        && check_max_bytes(&mut errors, "name", &fields.name, MAX_NAME_BYTES)
    {
        check_min_chars(&mut errors, "name", &fields.name, MIN_EVENT_NAME_CHARS);
    }
    if check_required(
        &mut errors,
        "description",
        &fields.description,
        "Description cannot be empty",
    ) {
        check_max_bytes(
            &mut errors,
            "description",
            &fields.description,
            MAX_DESCRIPTION_BYTES,
        );
    }
    if check_required(&mut errors, "date", &fields.date, "Date cannot be blank") {
        check_max_bytes(&mut errors, "date", &fields.date, MAX_DATE_BYTES);
    }
    if check_required(&mut errors, "location", &fields.location, "Location cannot be empty")
        && check_max_bytes(&mut errors, "location", &fields.location, MAX_LOCATION_BYTES)
    {
        check_min_chars(
            &mut errors,
            "location",
            &fields.location,
            MIN_EVENT_LOCATION_CHARS,
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meetup() -> EventFields {
        EventFields {
            name: "Meetup".to_string(),
            description: "Monthly meetup".to_string(),
            date: "2024-05-01".to_string(),
            location: "Hall A".to_string(),
        }
    }

    fn fields_of(errors: &ValidationErrors) -> Vec<&str> {
        errors.fields().iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_category() {
        assert!(check_category("Music", "Live shows").is_empty());
    }

    #[test]
    fn test_category_requires_both_fields() {
        let errors = check_category("", "  ");
        assert_eq!(fields_of(&errors), vec!["name", "description"]);
        assert_eq!(errors.fields()[0].message, "Name cannot be empty");
        assert_eq!(errors.fields()[1].message, "Description cannot be empty");
    }

    #[test]
    fn test_category_name_too_large() {
        let errors = check_category(&"x".repeat(MAX_NAME_BYTES + 1), "Live shows");
        assert_eq!(fields_of(&errors), vec!["name"]);
        assert_eq!(errors.fields()[0].message, "Name exceeds allowed limits");
    }

    #[test]
    fn test_valid_event() {
        assert!(check_event_fields(&meetup()).is_empty());
    }

    #[test]
    fn test_event_reports_every_violation() {
        let errors = check_event_fields(&EventFields::default());
        assert_eq!(
            fields_of(&errors),
            vec!["name", "description", "date", "location"]
        );
        assert_eq!(errors.fields()[2].message, "Date cannot be blank");
    }

    #[test]
    fn test_event_min_lengths() {
        let fields = EventFields {
            name: "Go".to_string(),
            location: "Hall".to_string(),
            ..meetup()
        };
        let errors = check_event_fields(&fields);
        assert_eq!(fields_of(&errors), vec!["name", "location"]);
        assert_eq!(
            errors.fields()[0].message,
            "Name must be at least 3 characters long"
        );
        assert_eq!(
            errors.fields()[1].message,
            "Location must be at least 5 characters long"
        );
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        let fields = EventFields {
            location: "Zürich".to_string(),
            ..meetup()
        };
        assert!(check_event_fields(&fields).is_empty());

        let fields = EventFields {
            location: "ÄÖÜß".to_string(),
            ..meetup()
        };
        assert_eq!(fields_of(&check_event_fields(&fields)), vec!["location"]);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("category", "Category does not exist");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Category does not exist");
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = check_category("", "");
        assert_eq!(
            errors.to_string(),
            "Name cannot be empty; Description cannot be empty"
        );
    }

    #[test]
    fn test_event_form_matches_rules() {
        let form = event_form();
        assert_eq!(form.len(), 4);
        assert!(form.iter().all(|f| f.required));
        let location = form.iter().find(|f| f.name == "location").unwrap();
        assert_eq!(location.min_length, Some(MIN_EVENT_LOCATION_CHARS));
    }
}
