//! Destination Explorer Main Application
//! Side panel with filters, central panel with map, filter summary and cards.
//! Every frame re-renders the cached table through `view::render`.

use crate::config::Settings;
use crate::data::{Catalog, DatasetCache, GeoPoint};
use crate::gui::{CardAction, CardList, FilterPanel, FilterPanelAction, MapPanel};
use crate::view::{render, state_options, Presentation};
use egui::{Color32, RichText, ScrollArea, SidePanel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const MAP_COLUMN_FRACTION: f32 = 0.66;

/// Outcome of the last load attempt.
enum Dataset {
    Ready(Arc<Catalog>),
    Failed(String),
}

/// Main application window.
pub struct ExplorerApp {
    source: PathBuf,
    cache: DatasetCache,
    dataset: Dataset,
    state_options: Vec<String>,
    filter_panel: FilterPanel,
    map_panel: MapPanel,
    focus: Option<GeoPoint>,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut app = Self {
            source: settings.source.clone(),
            cache: DatasetCache::new(),
            dataset: Dataset::Failed(String::new()),
            state_options: Vec::new(),
            filter_panel: FilterPanel::new(),
            map_panel: MapPanel::new(),
            focus: None,
        };
        app.load_source(settings.source);
        app
    }

    /// Load (or fetch from cache) the canonical table for `path`.
    fn load_source(&mut self, path: PathBuf) {
        self.filter_panel.set_source(&path);
        self.source = path;

        match self.cache.load(&self.source) {
            Ok(catalog) => {
                debug!(
                    path = %self.source.display(),
                    reads = self.cache.reads(),
                    cached = self.cache.cached_sources(),
                    "dataset ready"
                );
                self.state_options = state_options(&catalog);
                self.filter_panel.filter.reconcile(&self.state_options);
                self.focus = None;
                if catalog.is_empty() {
                    self.filter_panel
                        .set_status("No rows with both a name and a state were found");
                } else {
                    self.filter_panel.set_status(&format!(
                        "Loaded {} destinations in {} states",
                        catalog.len(),
                        self.state_options.len() - 1
                    ));
                }
                self.dataset = Dataset::Ready(catalog);
            }
            Err(err) => {
                error!(path = %self.source.display(), %err, "failed to load destinations");
                self.state_options.clear();
                self.focus = None;
                self.filter_panel.set_status(&format!("Error: {}", err));
                self.dataset = Dataset::Failed(err.to_string());
            }
        }
    }

    /// Handle CSV file selection
    fn handle_open_source(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            info!(path = %path.display(), "opening destination source");
            self.load_source(path);
        }
    }

    fn show_failure(&self, ui: &mut egui::Ui, message: &str) {
        ui.add_space(10.0);
        ui.label(RichText::new(message).size(14.0).color(ERROR_COLOR));
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!(
                "No data found. Please ensure {} exists with the required columns.",
                self.source.display()
            ))
            .size(14.0)
            .color(WARNING_COLOR),
        );
    }

    fn show_presentation(&mut self, ui: &mut egui::Ui, presentation: &Presentation) {
        ui.heading(RichText::new(format!("🗺️ {}", presentation.headline)).size(20.0));
        ui.add_space(8.0);

        let map_width = ui.available_width() * MAP_COLUMN_FRACTION;
        ui.horizontal_top(|ui| {
            if let Some(map) = &presentation.map {
                ui.vertical(|ui| {
                    ui.set_width(map_width);
                    if self.map_panel.show(ui, map, self.focus.is_some()) {
                        self.focus = None;
                    }
                });
                ui.add_space(15.0);
            }

            ui.vertical(|ui| {
                ui.label(RichText::new("🔍 Current Filters").size(16.0).strong());
                ui.add_space(5.0);
                for (label, value) in &presentation.filter_summary {
                    ui.horizontal(|ui| {
                        ui.label(format!("{}:", label));
                        ui.label(RichText::new(value).strong());
                    });
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        if let CardAction::FocusOnMap(point) = CardList::show(ui, presentation) {
            self.focus = Some(point);
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Filters and data source
        let mut action = FilterPanelAction::None;
        SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                let options = match self.dataset {
                    Dataset::Ready(_) => Some(self.state_options.as_slice()),
                    Dataset::Failed(_) => None,
                };
                action = self.filter_panel.show(ui, options);
            });

        match action {
            FilterPanelAction::FilterChanged => self.focus = None,
            FilterPanelAction::OpenSource => self.handle_open_source(),
            FilterPanelAction::Reload => {
                self.cache.invalidate(&self.source);
                self.load_source(self.source.clone());
            }
            FilterPanelAction::None => {}
        }

        let presentation = match &self.dataset {
            Dataset::Ready(catalog) => Ok(render(catalog, &self.filter_panel.filter, self.focus)),
            Dataset::Failed(message) => Err(message.clone()),
        };

        // Central panel - Map and destination cards
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(
                        RichText::new("🌍 Explore India - Tourist Destinations")
                            .size(26.0)
                            .strong(),
                    );
                    ui.label(
                        RichText::new("Discover the most amazing places to visit in India")
                            .color(Color32::GRAY),
                    );
                    ui.add_space(10.0);

                    match &presentation {
                        Ok(presentation) => self.show_presentation(ui, presentation),
                        Err(message) => self.show_failure(ui, message),
                    }
                });
        });
    }
}
