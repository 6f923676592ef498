//! Filter Panel Widget
//! Left side panel with the search box, state selector and data source controls.

use crate::view::{FilterState, StateSelection};
use egui::{Color32, ComboBox, RichText, TextEdit};
use std::path::Path;

/// Left side panel holding the current filter state.
pub struct FilterPanel {
    pub filter: FilterState,
    pub source_label: String,
    pub status: String,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            source_label: "No file selected".to_string(),
            status: "Ready".to_string(),
        }
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&mut self, path: &Path) {
        self.source_label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the panel. Filters are only offered once a table is loaded.
    pub fn show(&mut self, ui: &mut egui::Ui, state_options: Option<&[String]>) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 Explore India")
                    .size(22.0)
                    .color(Color32::from_rgb(37, 99, 235)),
            );
            ui.label(
                RichText::new("Tourist Destinations")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        if let Some(options) = state_options {
            ui.label(RichText::new("🔍 Filters").size(14.0).strong());
            ui.add_space(8.0);

            let search = ui.add(
                TextEdit::singleline(&mut self.filter.search_query)
                    .hint_text("Search destinations...")
                    .desired_width(f32::INFINITY),
            );
            if search.changed() {
                action = FilterPanelAction::FilterChanged;
            }

            ui.add_space(8.0);
            ui.label("Select State");

            let current = self.filter.selected_state.label().to_string();
            ComboBox::from_id_salt("state_filter")
                .width(ui.available_width())
                .selected_text(&current)
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui.selectable_label(current == *option, option).clicked()
                            && current != *option
                        {
                            self.filter.selected_state = StateSelection::from_label(option);
                            action = FilterPanelAction::FilterChanged;
                        }
                    }
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
        }

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&self.source_label).size(12.0));
                ui.horizontal(|ui| {
                    if ui.button("📂 Open CSV...").clicked() {
                        action = FilterPanelAction::OpenSource;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = FilterPanelAction::Reload;
                    }
                });
            });

        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    FilterChanged,
    OpenSource,
    Reload,
}
