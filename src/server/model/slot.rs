//! Half-open time intervals on a court.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::error::AppError;

/// What occupies an interval on a court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotKind {
    Reservation,
    Block,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reservation => "RESERVATION",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated half-open interval `[starts_at, ends_at)`.
///
/// Construction fails unless `ends_at` is strictly after `starts_at`, so every `TimeSlot`
/// has a positive length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a new interval.
    ///
    /// # Returns
    /// - `Ok(TimeSlot)` - `ends_at` is after `starts_at`
    /// - `Err(AppError::Validation)` - Empty or inverted interval
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self, AppError> {
        if ends_at <= starts_at {
            return Err(AppError::Validation(format!(
                "End time {} must be after start time {}",
                ends_at.to_rfc3339(),
                starts_at.to_rfc3339()
            )));
        }

        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }
}
