//! Destination Card List
//! One collapsible card per filtered destination.

use crate::data::GeoPoint;
use crate::view::{DestinationCard, Presentation, NO_RESULTS_MESSAGE};
use egui::{CollapsingHeader, Color32, RichText};

const CARD_SPACING: f32 = 12.0;
const IMAGE_COLUMN_WIDTH: f32 = 180.0;

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const WARNING: Color32 = Color32::from_rgb(243, 156, 18);

/// Actions triggered from a card
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    None,
    FocusOnMap(GeoPoint),
}

pub struct CardList;

impl CardList {
    /// Draw all cards, or the no-results notice.
    pub fn show(ui: &mut egui::Ui, presentation: &Presentation) -> CardAction {
        ui.label(RichText::new("🏞️ Destinations").size(18.0).strong());
        ui.add_space(8.0);

        if presentation.is_empty() {
            egui::Frame::none()
                .rounding(8.0)
                .stroke(egui::Stroke::new(1.5, WARNING))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(NO_RESULTS_MESSAGE).size(14.0).color(WARNING));
                });
            return CardAction::None;
        }

        let mut action = CardAction::None;
        for (idx, card) in presentation.cards.iter().enumerate() {
            if let CardAction::FocusOnMap(point) = Self::draw_card(ui, idx, card) {
                action = CardAction::FocusOnMap(point);
            }
            ui.add_space(CARD_SPACING);
        }
        action
    }

    fn draw_card(ui: &mut egui::Ui, idx: usize, card: &DestinationCard) -> CardAction {
        let mut action = CardAction::None;

        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                CollapsingHeader::new(RichText::new(&card.title).size(16.0).strong())
                    .id_salt(("destination_card", idx))
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.horizontal_top(|ui| {
                            ui.vertical(|ui| {
                                ui.set_width(IMAGE_COLUMN_WIDTH);
                                match &card.image {
                                    Some(image) => {
                                        ui.add(
                                            egui::Image::from_uri(&image.url)
                                                .max_width(IMAGE_COLUMN_WIDTH)
                                                .rounding(6.0),
                                        );
                                        ui.label(
                                            RichText::new(&image.caption)
                                                .small()
                                                .color(Color32::GRAY),
                                        );
                                    }
                                    None => {
                                        ui.label(
                                            RichText::new("No image available")
                                                .color(Color32::GRAY),
                                        );
                                    }
                                }
                            });

                            ui.vertical(|ui| {
                                Self::field(ui, "State:", &card.state);
                                Self::field(ui, "Description:", &card.description);

                                if !card.attractions.is_empty() {
                                    ui.add_space(4.0);
                                    ui.label(RichText::new("Popular Attractions:").strong());
                                    for attraction in &card.attractions {
                                        ui.label(format!("• {attraction}"));
                                    }
                                }

                                if let Some(point) = card.focus {
                                    ui.add_space(6.0);
                                    let button = egui::Button::new(
                                        RichText::new("📍 View on Map").color(Color32::WHITE),
                                    )
                                    .fill(ACCENT);
                                    if ui.add(button).on_hover_text(card.focus_hint()).clicked() {
                                        action = CardAction::FocusOnMap(point);
                                    }
                                }
                            });
                        });
                    });
            });

        action
    }

    fn field(ui: &mut egui::Ui, label: &str, value: &str) {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(label).strong());
            ui.label(value);
        });
    }
}
