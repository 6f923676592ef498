//! Schema Resolution Module
//! Maps free-form CSV headers onto the canonical destination columns.

use super::loader::DatasetError;
use tracing::debug;

/// Canonical destination columns, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    State,
    Description,
    PopularAttractions,
    ImageUrl,
    Latitude,
    Longitude,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::State,
        Field::Description,
        Field::PopularAttractions,
        Field::ImageUrl,
        Field::Latitude,
        Field::Longitude,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::State => "state",
            Field::Description => "description",
            Field::PopularAttractions => "popular_attractions",
            Field::ImageUrl => "image_url",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }

    /// Accepted normalized headers, highest priority first.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "destination", "place", "title", "location"],
            Field::State => &["state", "region", "province"],
            Field::Description => &["description", "desc", "details", "about", "significance"],
            Field::PopularAttractions => &[
                "popular_attractions",
                "attractions",
                "popular_attraction",
                "attraction",
                "type",
            ],
            Field::ImageUrl => &[
                "image_url",
                "image",
                "image_link",
                "imageurl",
                "photo",
                "photo_url",
            ],
            Field::Latitude => &["latitude", "lat"],
            Field::Longitude => &["longitude", "lon", "long", "lng"],
        }
    }

    /// Raw headers consulted when no synonym matched.
    fn fallbacks(self) -> &'static [&'static str] {
        match self {
            Field::Description => &["significance", "type"],
            Field::PopularAttractions => &["type"],
            _ => &[],
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::Name | Field::State)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Trim, lowercase and replace spaces with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Where a canonical column takes its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    /// Position of the raw column in the source header row.
    Raw(usize),
    /// No source column; every row gets an empty / absent value.
    Blank,
}

/// Resolved header mapping for one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    sources: [ColumnSource; 7],
}

/// A normalized header that survived the `unnamed` / duplicate pass.
struct Candidate {
    name: String,
    position: usize,
    consumed_by: Option<Field>,
}

impl ColumnMapping {
    /// Resolve canonical columns from the raw header row.
    pub fn resolve(raw_headers: &[String]) -> Result<Self, DatasetError> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for (position, raw) in raw_headers.iter().enumerate() {
            let name = normalize_header(raw);
            if name.starts_with("unnamed") || candidates.iter().any(|c| c.name == name) {
                continue;
            }
            candidates.push(Candidate {
                name,
                position,
                consumed_by: None,
            });
        }

        let mut sources = [ColumnSource::Blank; 7];

        for field in Field::ALL {
            if let Some(position) = claim(&mut candidates, field, field.synonyms()) {
                sources[field.index()] = ColumnSource::Raw(position);
            }
        }

        let missing: Vec<String> = Field::ALL
            .iter()
            .filter(|f| f.is_required() && sources[f.index()] == ColumnSource::Blank)
            .map(|f| f.canonical_name().to_string())
            .collect();

        if !missing.is_empty() {
            let available = candidates
                .iter()
                .map(|c| match c.consumed_by {
                    Some(field) => field.canonical_name().to_string(),
                    None => c.name.clone(),
                })
                .collect();
            return Err(DatasetError::MissingRequiredColumns { missing, available });
        }

        for field in Field::ALL {
            if sources[field.index()] != ColumnSource::Blank {
                continue;
            }
            if let Some(position) = claim(&mut candidates, field, field.fallbacks()) {
                debug!(field = field.canonical_name(), "derived from fallback column");
                sources[field.index()] = ColumnSource::Raw(position);
            }
        }

        Ok(Self { sources })
    }

    pub fn source(&self, field: Field) -> ColumnSource {
        self.sources[field.index()]
    }

    /// Both coordinate columns were found in the source.
    pub fn has_coordinates(&self) -> bool {
        self.source(Field::Latitude) != ColumnSource::Blank
            && self.source(Field::Longitude) != ColumnSource::Blank
    }
}

/// Take the first unconsumed candidate whose name is in `options`.
fn claim(candidates: &mut [Candidate], field: Field, options: &[&str]) -> Option<usize> {
    for option in options {
        let found = candidates
            .iter_mut()
            .find(|c| c.consumed_by.is_none() && c.name == *option);
        if let Some(candidate) = found {
            candidate.consumed_by = Some(field);
            debug!(
                field = field.canonical_name(),
                column = %candidate.name,
                "resolved column"
            );
            return Some(candidate.position);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header("  Popular Attractions "), "popular_attractions");
        assert_eq!(normalize_header("Image URL"), "image_url");
        assert_eq!(normalize_header("LAT"), "lat");
    }

    #[test]
    fn canonical_name_beats_later_synonym() {
        let mapping =
            ColumnMapping::resolve(&headers(&["name", "state", "lat", "latitude", "lon"])).unwrap();
        assert_eq!(mapping.source(Field::Latitude), ColumnSource::Raw(3));
        assert_eq!(mapping.source(Field::Longitude), ColumnSource::Raw(4));
    }

    #[test]
    fn lower_priority_synonym_adopted_when_alone() {
        let mapping = ColumnMapping::resolve(&headers(&["Place", "Region", "Lat", "Lng"])).unwrap();
        assert_eq!(mapping.source(Field::Name), ColumnSource::Raw(0));
        assert_eq!(mapping.source(Field::State), ColumnSource::Raw(1));
        assert_eq!(mapping.source(Field::Latitude), ColumnSource::Raw(2));
        assert_eq!(mapping.source(Field::Longitude), ColumnSource::Raw(3));
        assert!(mapping.has_coordinates());
    }

    #[test]
    fn priority_follows_synonym_order_not_column_order() {
        let mapping =
            ColumnMapping::resolve(&headers(&["location", "destination", "province", "state"]))
                .unwrap();
        assert_eq!(mapping.source(Field::Name), ColumnSource::Raw(1));
        assert_eq!(mapping.source(Field::State), ColumnSource::Raw(3));
    }

    #[test]
    fn unnamed_columns_are_discarded() {
        let err = ColumnMapping::resolve(&headers(&["Unnamed: 0", "name"])).unwrap_err();
        match err {
            DatasetError::MissingRequiredColumns { missing, available } => {
                assert_eq!(missing, vec!["state"]);
                assert_eq!(available, vec!["name"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_reports_available_columns() {
        let err = ColumnMapping::resolve(&headers(&[
            "Description",
            "Image",
            "Latitude",
            "Longitude",
            "Notes",
        ]))
        .unwrap_err();
        match err {
            DatasetError::MissingRequiredColumns { missing, available } => {
                assert_eq!(missing, vec!["name", "state"]);
                assert_eq!(
                    available,
                    vec!["description", "image_url", "latitude", "longitude", "notes"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_feeds_attractions_and_is_not_reused() {
        let mapping = ColumnMapping::resolve(&headers(&["name", "state", "type"])).unwrap();
        assert_eq!(mapping.source(Field::PopularAttractions), ColumnSource::Raw(2));
        assert_eq!(mapping.source(Field::Description), ColumnSource::Blank);
        assert_eq!(mapping.source(Field::ImageUrl), ColumnSource::Blank);
        assert!(!mapping.has_coordinates());
    }

    #[test]
    fn unconsumed_type_falls_back_to_description() {
        let mapping =
            ColumnMapping::resolve(&headers(&["name", "state", "attractions", "type"])).unwrap();
        assert_eq!(mapping.source(Field::PopularAttractions), ColumnSource::Raw(2));
        assert_eq!(mapping.source(Field::Description), ColumnSource::Raw(3));
    }

    #[test]
    fn duplicate_normalized_headers_keep_first() {
        let mapping = ColumnMapping::resolve(&headers(&["Name", "name ", "State"])).unwrap();
        assert_eq!(mapping.source(Field::Name), ColumnSource::Raw(0));
        assert_eq!(mapping.source(Field::State), ColumnSource::Raw(2));
    }
}
