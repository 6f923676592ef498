//! GUI module - User interface components

mod app;
mod card_list;
mod filter_panel;
mod map_panel;

pub use app::ExplorerApp;
pub use card_list::{CardAction, CardList};
pub use filter_panel::{FilterPanel, FilterPanelAction};
pub use map_panel::MapPanel;
