//! Destination Records
//! Canonical, already-validated rows produced by the loader.

use std::collections::BTreeSet;

/// A latitude/longitude pair. Only constructed when both halves coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One row of the canonical table.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub name: String,
    pub state: String,
    pub description: String,
    pub popular_attractions: String,
    pub image_url: String,
    pub coordinates: Option<GeoPoint>,
}

impl Destination {
    /// Attractions split on commas, trimmed, empties discarded.
    pub fn attractions(&self) -> Vec<String> {
        parse_attractions(&self.popular_attractions)
    }

    pub fn image(&self) -> Option<&str> {
        if self.image_url.is_empty() {
            None
        } else {
            Some(&self.image_url)
        }
    }
}

/// Split a comma separated attraction list, dropping blank pieces.
pub fn parse_attractions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// The immutable canonical table for one source.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    destinations: Vec<Destination>,
    has_coordinate_columns: bool,
}

impl Catalog {
    pub fn new(destinations: Vec<Destination>, has_coordinate_columns: bool) -> Self {
        Self {
            destinations,
            has_coordinate_columns,
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Whether the source carried both a latitude and a longitude column.
    pub fn has_coordinate_columns(&self) -> bool {
        self.has_coordinate_columns
    }

    /// Distinct states, sorted ascending.
    pub fn states(&self) -> Vec<String> {
        self.destinations
            .iter()
            .map(|d| d.state.as_str())
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
