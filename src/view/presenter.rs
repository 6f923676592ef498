//! Presentation Model
//! Turns the canonical table plus filter state into map and card descriptions.
//! Pure: the GUI only draws what `render` returns.

use super::filter::{apply_filters, FilterState, StateSelection};
use crate::config::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, FOCUS_MAP_ZOOM};
use crate::data::{Catalog, Destination, GeoPoint};

pub const NO_RESULTS_MESSAGE: &str =
    "No destinations found matching your criteria. Try adjusting your filters.";
pub const NO_MAP_RESULTS_MESSAGE: &str = "No destinations to show on the map";

/// A map annotation for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    pub label: String,
    pub tooltip: String,
}

/// What the map surface should show.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub no_results: bool,
}

/// Picture shown on a card, captioned with the destination name.
#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    pub url: String,
    pub caption: String,
}

/// Detail card for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationCard {
    pub title: String,
    pub name: String,
    pub image: Option<CardImage>,
    pub state: String,
    pub description: String,
    pub attractions: Vec<String>,
    /// Coordinates to centre the map on, when the destination has them.
    pub focus: Option<GeoPoint>,
}

impl DestinationCard {
    fn from_destination(destination: &Destination) -> Self {
        Self {
            title: format!("{}, {}", destination.name, destination.state),
            name: destination.name.clone(),
            image: destination.image().map(|url| CardImage {
                url: url.to_string(),
                caption: destination.name.clone(),
            }),
            state: destination.state.clone(),
            description: destination.description.clone(),
            attractions: destination.attractions(),
            focus: destination.coordinates,
        }
    }

    pub fn focus_hint(&self) -> String {
        format!("Show {} on the map", self.name)
    }
}

/// Everything one frame needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub match_count: usize,
    pub headline: String,
    pub filter_summary: Vec<(&'static str, String)>,
    pub map: Option<MapView>,
    pub cards: Vec<DestinationCard>,
}

impl Presentation {
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

/// Build the presentation for the current filter and optional map focus.
pub fn render(catalog: &Catalog, filter: &FilterState, focus: Option<GeoPoint>) -> Presentation {
    let matches = apply_filters(catalog, filter);

    let map = catalog
        .has_coordinate_columns()
        .then(|| map_view(&matches, focus));

    let cards = matches
        .iter()
        .map(|d| DestinationCard::from_destination(d))
        .collect();

    Presentation {
        match_count: matches.len(),
        headline: format!("{} Destinations Found", matches.len()),
        filter_summary: filter_summary(filter),
        map,
        cards,
    }
}

fn map_view(matches: &[&Destination], focus: Option<GeoPoint>) -> MapView {
    let markers = matches
        .iter()
        .filter_map(|d| {
            d.coordinates.map(|position| Marker {
                position,
                label: d.name.clone(),
                tooltip: d.name.clone(),
            })
        })
        .collect();

    let (center, zoom) = match focus {
        Some(point) => (point, FOCUS_MAP_ZOOM),
        None => (DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM),
    };

    MapView {
        center,
        zoom,
        markers,
        no_results: matches.is_empty(),
    }
}

fn filter_summary(filter: &FilterState) -> Vec<(&'static str, String)> {
    let state = match &filter.selected_state {
        StateSelection::All => "All States".to_string(),
        StateSelection::Only(state) => state.clone(),
    };
    let mut lines = vec![("State", state)];
    if let Some(query) = filter.active_query() {
        lines.push(("Search", query.to_string()));
    }
    lines
}
