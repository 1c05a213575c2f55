use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::models::position::Coordinate;

/// Failures of the location watch. All recoverable: the caller may retry
/// by starting a new subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// The user declined location access.
    PermissionDenied,
    /// The platform has no location capability.
    Unavailable,
    /// No fix was obtained within the configured wait.
    Timeout,
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::PermissionDenied => write!(f, "location access was denied"),
            TrackerError::Unavailable => write!(f, "no location capability is available"),
            TrackerError::Timeout => write!(f, "timed out waiting for a location fix"),
        }
    }
}

impl Error for TrackerError {}

/// The ranker's only failure mode: a coordinate outside geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankError {
    InvalidCoordinate(Coordinate),
}

impl Display for RankError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RankError::InvalidCoordinate(c) => {
                write!(f, "coordinate ({}, {}) is out of geographic bounds", c.lat, c.lon)
            }
        }
    }
}

impl Error for RankError {}
