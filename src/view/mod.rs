//! View module - filtering and the presentation model drawn by the GUI

mod filter;
mod presenter;

pub use filter::{state_options, FilterState, StateSelection};
pub use presenter::{
    render, DestinationCard, MapView, Presentation, NO_MAP_RESULTS_MESSAGE, NO_RESULTS_MESSAGE,
};
