//! Capacity value object.
//!
//! Represents the total number of seats a class can hold, together with the
//! checks the booking counter is validated against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, ErrorCode, ValidationError};

/// Smallest capacity a class may be created with.
pub const MIN_CAPACITY: u32 = 1;

/// Largest capacity a class may be created with.
pub const MAX_CAPACITY: u32 = 1000;

/// Total seats available in a class.
///
/// # Invariants
///
/// - Value is within `1..=1000`
/// - Immutable once constructed; equality by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a capacity, rejecting values outside `1..=1000`.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&value) {
            return Err(ValidationError::out_of_range(
                "capacity",
                MIN_CAPACITY as i64,
                MAX_CAPACITY as i64,
                value as i64,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the capacity value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Checks whether another booking fits below this capacity.
    pub fn has_availability(&self, current_bookings: u32) -> bool {
        current_bookings < self.0
    }

    /// Returns the number of free seats.
    ///
    /// # Errors
    ///
    /// Returns an error if `current_bookings` exceeds the capacity, which
    /// indicates a corrupted counter rather than a full class.
    pub fn remaining(&self, current_bookings: u32) -> Result<u32, DomainError> {
        if current_bookings > self.0 {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!(
                    "Current bookings ({}) exceed capacity ({})",
                    current_bookings, self.0
                ),
            ));
        }
        Ok(self.0 - current_bookings)
    }

    /// Checks whether a booking can be added.
    pub fn can_book(&self, current_bookings: u32) -> bool {
        self.has_availability(current_bookings)
    }

    /// Checks whether a booking can be removed.
    pub fn can_cancel(&self, current_bookings: u32) -> bool {
        current_bookings > 0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
