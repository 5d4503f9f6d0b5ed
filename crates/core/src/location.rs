// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property location and GPS types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected GPS coordinate pair
#[derive(Debug, Error, PartialEq)]
#[error("coordinates must be finite: ({latitude}, {longitude})")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated GPS coordinate pair. Both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a coordinate pair, rejecting NaN and infinite components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if latitude.is_finite() && longitude.is_finite() {
            Ok(Self { latitude, longitude })
        } else {
            Err(InvalidCoordinate { latitude, longitude })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Structured address of the property plus optional coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GeoPoint>,
}

impl Location {
    pub fn address(address: impl Into<String>) -> Self {
        Self { address: address.into(), gps: None }
    }

    pub fn with_gps(mut self, gps: GeoPoint) -> Self {
        self.gps = Some(gps);
        self
    }
}

/// One GPS reading taken during an audit session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsSample {
    pub point: GeoPoint,
    /// Horizontal accuracy in meters, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
    pub captured_at_ms: u64,
}

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
