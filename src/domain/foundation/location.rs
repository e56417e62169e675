//! Location value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Longest accepted location string.
pub const MAX_LOCATION_LENGTH: usize = 200;

/// Substrings that mark a location as virtual.
const VIRTUAL_KEYWORDS: &[&str] = &[
    "online",
    "virtual",
    "zoom",
    "webinar",
    "meet.google",
    "teams",
    "skype",
];

/// Where a class takes place, physical or virtual.
///
/// Classified as virtual when the text contains a known meeting-platform
/// keyword; everything else counts as a physical address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Creates a location, trimming whitespace and validating length.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("location"));
        }
        if trimmed.chars().count() > MAX_LOCATION_LENGTH {
            return Err(ValidationError::invalid_format(
                "location",
                format!("Location cannot exceed {} characters", MAX_LOCATION_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the location text.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Checks whether this is a virtual (online) location.
    pub fn is_virtual(&self) -> bool {
        let lower = self.0.to_lowercase();
        VIRTUAL_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Checks whether this is a physical location.
    pub fn is_physical(&self) -> bool {
        !self.is_virtual()
    }

    /// Returns a short description, truncated to 50 characters.
    pub fn short_description(&self) -> String {
        if self.0.chars().count() <= 50 {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(47).collect();
        format!("{}...", head)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        let location = Location::new("Studio 3, 12 High Street").unwrap();
        assert_eq!(location.value(), "Studio 3, 12 High Street");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let location = Location::new("  Main Hall  ").unwrap();
        assert_eq!(location.value(), "Main Hall");
    }

    #[test]
    fn rejects_empty_value() {
        assert!(Location::new("").is_err());
        assert!(Location::new("   ").is_err());
    }

    #[test]
    fn rejects_value_over_two_hundred_chars() {
        let long = "x".repeat(201);
        assert!(Location::new(long).is_err());
        let max = "x".repeat(200);
        assert!(Location::new(max).is_ok());
    }

    #[test]
    fn zoom_link_is_virtual() {
        let location = Location::new("https://zoom.us/j/123456").unwrap();
        assert!(location.is_virtual());
        assert!(!location.is_physical());
    }

    #[test]
    fn keyword_detection_is_case_insensitive() {
        assert!(Location::new("Microsoft TEAMS meeting").unwrap().is_virtual());
        assert!(Location::new("Online session").unwrap().is_virtual());
        assert!(Location::new("meet.google.com/abc-defg").unwrap().is_virtual());
    }

    #[test]
    fn street_address_is_physical() {
        let location = Location::new("45 River Road, Leeds").unwrap();
        assert!(location.is_physical());
        assert!(!location.is_virtual());
    }

    #[test]
    fn short_description_keeps_short_values() {
        let location = Location::new("Main Hall").unwrap();
        assert_eq!(location.short_description(), "Main Hall");
    }

    #[test]
    fn short_description_truncates_long_values() {
        let long = "a".repeat(80);
        let location = Location::new(long).unwrap();
        let short = location.short_description();
        assert_eq!(short.chars().count(), 50);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(Location::new("Room 1").unwrap(), Location::new("Room 1").unwrap());
        assert_ne!(Location::new("Room 1").unwrap(), Location::new("Room 2").unwrap());
    }
}
