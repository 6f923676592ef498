//! Destination Filtering
//! Free-text search and state selection over the canonical table.

use crate::data::{Catalog, Destination};

/// Sentinel shown at the top of the state selector.
pub const ALL_STATES: &str = "All";

/// Current state selector value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StateSelection {
    #[default]
    All,
    Only(String),
}

impl StateSelection {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_STATES {
            StateSelection::All
        } else {
            StateSelection::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StateSelection::All => ALL_STATES,
            StateSelection::Only(state) => state,
        }
    }

    fn accepts(&self, destination: &Destination) -> bool {
        match self {
            StateSelection::All => true,
            StateSelection::Only(state) => destination.state == *state,
        }
    }
}

/// User-chosen search text and region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub selected_state: StateSelection,
}

impl FilterState {
    pub fn new(search_query: impl Into<String>, selected_state: StateSelection) -> Self {
        Self {
            search_query: search_query.into(),
            selected_state,
        }
    }

    /// Trimmed query, or `None` when the search box is effectively empty.
    pub fn active_query(&self) -> Option<&str> {
        let query = self.search_query.trim();
        (!query.is_empty()).then_some(query)
    }

    /// Drop a selection that the current table cannot satisfy.
    pub fn reconcile(&mut self, options: &[String]) {
        if let StateSelection::Only(state) = &self.selected_state {
            if !options.iter().any(|o| o == state) {
                self.selected_state = StateSelection::All;
            }
        }
    }
}

/// Case-insensitive literal substring match on name, description or attractions.
fn query_matches(lowered_query: &str, destination: &Destination) -> bool {
    [
        &destination.name,
        &destination.description,
        &destination.popular_attractions,
    ]
    .iter()
    .any(|text| !text.is_empty() && text.to_lowercase().contains(lowered_query))
}

/// Selector options: "All" followed by the table's sorted distinct states.
pub fn state_options(catalog: &Catalog) -> Vec<String> {
    std::iter::once(ALL_STATES.to_string())
        .chain(catalog.states())
        .collect()
}

/// Rows of `catalog` that pass `filter`, in table order.
pub fn apply_filters<'a>(catalog: &'a Catalog, filter: &FilterState) -> Vec<&'a Destination> {
    let rows = catalog.destinations().iter().collect();
    let rows = filter_by_query(rows, &filter.search_query);
    filter_by_state(rows, &filter.selected_state)
}

/// Keep rows matching the search query; a blank query keeps everything.
pub fn filter_by_query<'a>(rows: Vec<&'a Destination>, query: &str) -> Vec<&'a Destination> {
    let query = query.trim();
    if query.is_empty() {
        return rows;
    }
    let lowered = query.to_lowercase();
    rows.into_iter()
        .filter(|d| query_matches(&lowered, d))
        .collect()
}

/// Keep rows in the selected state only.
pub fn filter_by_state<'a>(
    rows: Vec<&'a Destination>,
    selection: &StateSelection,
) -> Vec<&'a Destination> {
    rows.into_iter().filter(|d| selection.accepts(d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GeoPoint;

    fn destination(name: &str, state: &str, description: &str, attractions: &str) -> Destination {
        Destination {
            name: name.to_string(),
            state: state.to_string(),
            description: description.to_string(),
            popular_attractions: attractions.to_string(),
            image_url: String::new(),
            coordinates: Some(GeoPoint::new(10.0, 76.0)),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                destination("Taj Mahal", "Uttar Pradesh", "Wonder of the world", "Mausoleum"),
                destination("Varanasi", "Uttar Pradesh", "Spiritual capital", "Ghats, Temple"),
                destination("Hampi", "Karnataka", "", "Virupaksha Temple, Stone Chariot"),
                destination("Goa", "Goa", "Beaches and nightlife", "Baga Beach, , Fort Aguada"),
                destination("Munnar", "Kerala", "Tea gardens", ""),
            ],
            true,
        )
    }

    fn names(rows: &[&Destination]) -> Vec<String> {
        rows.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let catalog = catalog();
        let rows = apply_filters(&catalog, &FilterState::default());
        assert_eq!(
            names(&rows),
            vec!["Taj Mahal", "Varanasi", "Hampi", "Goa", "Munnar"]
        );
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = catalog();
        let by_name = apply_filters(&catalog, &FilterState::new("hAmPi", StateSelection::All));
        assert_eq!(names(&by_name), vec!["Hampi"]);

        let by_description =
            apply_filters(&catalog, &FilterState::new("WONDER", StateSelection::All));
        assert_eq!(names(&by_description), vec!["Taj Mahal"]);

        let by_attraction =
            apply_filters(&catalog, &FilterState::new("temple", StateSelection::All));
        assert_eq!(names(&by_attraction), vec!["Varanasi", "Hampi"]);
    }

    #[test]
    fn search_is_literal_not_a_pattern() {
        let catalog = catalog();
        let rows = apply_filters(&catalog, &FilterState::new("T.j", StateSelection::All));
        assert!(rows.is_empty());
    }

    #[test]
    fn whitespace_query_is_no_filter() {
        let catalog = catalog();
        let rows = apply_filters(&catalog, &FilterState::new("   ", StateSelection::All));
        assert_eq!(rows.len(), catalog.len());
    }

    #[test]
    fn state_selection_is_exact() {
        let catalog = catalog();
        let rows = apply_filters(
            &catalog,
            &FilterState::new("", StateSelection::Only("Uttar Pradesh".to_string())),
        );
        assert_eq!(names(&rows), vec!["Taj Mahal", "Varanasi"]);

        let lowercase = apply_filters(
            &catalog,
            &FilterState::new("", StateSelection::Only("uttar pradesh".to_string())),
        );
        assert!(lowercase.is_empty());
    }

    #[test]
    fn filters_commute() {
        let catalog = catalog();
        let queries = ["", "temple", "a", "beach", "zzz", "Ghats"];
        let selections = state_options(&catalog);

        for query in queries {
            for label in &selections {
                let selection = StateSelection::from_label(label);
                let all: Vec<&Destination> = catalog.destinations().iter().collect();

                let query_first = filter_by_state(filter_by_query(all.clone(), query), &selection);
                let state_first = filter_by_query(filter_by_state(all, &selection), query);
                let combined =
                    apply_filters(&catalog, &FilterState::new(query, selection.clone()));

                assert_eq!(names(&query_first), names(&state_first), "{query} / {label}");
                assert_eq!(names(&query_first), names(&combined), "{query} / {label}");
            }
        }
    }

    #[test]
    fn state_options_start_with_all() {
        let catalog = catalog();
        assert_eq!(
            state_options(&catalog),
            vec!["All", "Goa", "Karnataka", "Kerala", "Uttar Pradesh"]
        );
        assert_eq!(state_options(&Catalog::default()), vec!["All"]);
    }

    #[test]
    fn stale_selection_falls_back_to_all() {
        let catalog = catalog();
        let options = state_options(&catalog);

        let mut filter = FilterState::new("", StateSelection::Only("Kerala".to_string()));
        filter.reconcile(&options);
        assert_eq!(filter.selected_state.label(), "Kerala");

        let mut filter = FilterState::new("", StateSelection::Only("Sikkim".to_string()));
        filter.reconcile(&options);
        assert_eq!(filter.selected_state, StateSelection::All);
    }
}
