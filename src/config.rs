//! Application settings: command line, map defaults and window geometry.

use crate::data::GeoPoint;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_SOURCE: &str = "destinations.csv";

/// Geographic centre used to frame India.
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint::new(20.5937, 78.9629);
pub const DEFAULT_MAP_ZOOM: u8 = 5;
/// Zoom used when a card asks the map to focus on it.
pub const FOCUS_MAP_ZOOM: u8 = 10;

pub const WINDOW_SIZE: [f32; 2] = [1400.0, 850.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [1000.0, 650.0];

#[derive(Parser, Debug, Clone)]
#[command(name = "destination-explorer")]
#[command(about = "Browse tourist destinations from a CSV file", long_about = None)]
pub struct Settings {
    /// CSV file with one destination per row
    #[arg(default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,
}
