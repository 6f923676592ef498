//! Map Panel Widget
//! Draws destination markers on a longitude/latitude plane with egui_plot.

use crate::data::GeoPoint;
use crate::view::{MapView, NO_MAP_RESULTS_MESSAGE};
use egui::{Align2, Color32, RichText};
use egui_plot::{MarkerShape, Plot, PlotBounds, PlotPoint, Points, Text};

const MAP_WIDTH: f32 = 700.0;
const MAP_HEIGHT: f32 = 400.0;
const TILE_SIZE: f64 = 256.0;

pub const MARKER_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

/// Degrees of longitude and latitude visible at `zoom` for a viewport in pixels.
pub fn view_span(zoom: u8, width: f32, height: f32) -> (f64, f64) {
    let degrees_per_pixel = 360.0 / (TILE_SIZE * 2f64.powi(i32::from(zoom)));
    (
        f64::from(width) * degrees_per_pixel,
        f64::from(height) * degrees_per_pixel,
    )
}

/// Interactive map. Pans and zooms freely; snaps back whenever the requested
/// centre or zoom changes.
#[derive(Default)]
pub struct MapPanel {
    applied: Option<(GeoPoint, u8)>,
}

impl MapPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the map. Returns true when the user asked to leave a focused view.
    pub fn show(&mut self, ui: &mut egui::Ui, map: &MapView, focused: bool) -> bool {
        let mut reset_clicked = false;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Map View").size(16.0).strong());
            if focused && ui.small_button("↺ Reset view").clicked() {
                reset_clicked = true;
            }
        });

        if map.no_results {
            ui.label(
                RichText::new(NO_MAP_RESULTS_MESSAGE)
                    .size(13.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
        }

        let requested = (map.center, map.zoom);
        let snap = self.applied != Some(requested);
        let width = ui.available_width().min(MAP_WIDTH);
        let (lon_span, lat_span) = view_span(map.zoom, width, MAP_HEIGHT);
        let center = map.center;

        Plot::new("destination_map")
            .width(width)
            .height(MAP_HEIGHT)
            .data_aspect(1.0)
            .allow_scroll(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("{:.4}, {:.4}", value.y, value.x)
                } else {
                    format!("{}\n{:.4}, {:.4}", name, value.y, value.x)
                }
            })
            .show(ui, |plot_ui| {
                if snap {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [
                            center.longitude - lon_span / 2.0,
                            center.latitude - lat_span / 2.0,
                        ],
                        [
                            center.longitude + lon_span / 2.0,
                            center.latitude + lat_span / 2.0,
                        ],
                    ));
                }

                let label_offset = lat_span / 60.0;
                for marker in &map.markers {
                    let position = marker.position;
                    plot_ui.points(
                        Points::new(vec![[position.longitude, position.latitude]])
                            .name(&marker.tooltip)
                            .shape(MarkerShape::Circle)
                            .radius(6.0)
                            .color(MARKER_COLOR),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(position.longitude, position.latitude + label_offset),
                            RichText::new(&marker.label).size(11.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });

        self.applied = Some(requested);
        reset_clicked
    }
}
