//! CSV Data Loader Module
//! Reads a destination CSV with Polars and turns it into the canonical table.

use super::record::{Catalog, Destination, GeoPoint};
use super::schema::{ColumnMapping, ColumnSource, Field};
use polars::prelude::*;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Underlying cause of an unexpected read failure.
#[derive(Error, Debug)]
pub enum LoadCause {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] PolarsError),
    #[error("malformed CSV: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(
        "{} not found. Please place {} in the app directory.",
        .path.display(),
        .path.display()
    )]
    SourceNotFound { path: PathBuf },
    #[error("{} is empty or invalid. Please check the file.", .path.display())]
    EmptyOrInvalidSource { path: PathBuf },
    #[error(
        "Required column(s) not found in CSV file: {:?}. Available columns: {}",
        .missing,
        .available.join(", ")
    )]
    MissingRequiredColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("Error loading data: {0}")]
    Load(#[from] LoadCause),
}

impl From<PolarsError> for DatasetError {
    fn from(err: PolarsError) -> Self {
        DatasetError::Load(LoadCause::Csv(err))
    }
}

/// Canonical columns pulled out of the raw frame, one entry per raw row.
struct CanonicalColumns {
    name: Vec<Option<String>>,
    state: Vec<Option<String>>,
    description: Vec<Option<String>>,
    popular_attractions: Vec<Option<String>>,
    image_url: Vec<Option<String>>,
    latitude: Vec<Option<String>>,
    longitude: Vec<Option<String>>,
}

/// Handles CSV file loading and normalization.
pub struct DataLoader;

impl DataLoader {
    /// Read `path` and build its canonical table.
    pub fn load_catalog(path: &Path) -> Result<Catalog, DatasetError> {
        let df = Self::read_frame(path)?;
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mapping = ColumnMapping::resolve(&headers)?;
        let columns = CanonicalColumns::extract(&df, &headers, &mapping)?;
        let raw_rows = df.height();
        let destinations = columns.into_destinations();

        let dropped = raw_rows - destinations.len();
        if dropped > 0 {
            warn!(
                path = %path.display(),
                dropped,
                "dropped rows without a name or state"
            );
        }
        info!(
            path = %path.display(),
            raw_rows,
            kept = destinations.len(),
            "loaded destinations"
        );

        Ok(Catalog::new(destinations, mapping.has_coordinates()))
    }

    /// Read the raw CSV with every column kept as text.
    fn read_frame(path: &Path) -> Result<DataFrame, DatasetError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DatasetError::SourceNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => return Err(LoadCause::Io(err).into()),
        };

        let bytes = strip_bom(bytes);
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(DatasetError::EmptyOrInvalidSource {
                path: path.to_path_buf(),
            });
        }

        let result = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| {
                opts.with_encoding(CsvEncoding::LossyUtf8)
                    .with_truncate_ragged_lines(true)
            })
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish();

        let df = match result {
            Ok(df) => df,
            Err(PolarsError::NoData(_)) => {
                return Err(DatasetError::EmptyOrInvalidSource {
                    path: path.to_path_buf(),
                })
            }
            Err(PolarsError::ComputeError(msg)) => {
                let msg = msg.to_string();
                let summary = msg.lines().next().unwrap_or_default().trim();
                return Err(LoadCause::Malformed(summary.to_string()).into());
            }
            Err(err) => return Err(err.into()),
        };

        if !has_data(&df) {
            return Err(DatasetError::EmptyOrInvalidSource {
                path: path.to_path_buf(),
            });
        }

        Ok(df)
    }
}

impl CanonicalColumns {
    fn extract(
        df: &DataFrame,
        headers: &[String],
        mapping: &ColumnMapping,
    ) -> Result<Self, PolarsError> {
        let column = |field: Field| text_column(df, headers, mapping.source(field));
        Ok(Self {
            name: column(Field::Name)?,
            state: column(Field::State)?,
            description: column(Field::Description)?,
            popular_attractions: column(Field::PopularAttractions)?,
            image_url: column(Field::ImageUrl)?,
            latitude: column(Field::Latitude)?,
            longitude: column(Field::Longitude)?,
        })
    }

    /// Assemble records, skipping rows without a name or state.
    fn into_destinations(self) -> Vec<Destination> {
        let rows = self
            .name
            .into_iter()
            .zip(self.state)
            .zip(self.description)
            .zip(self.popular_attractions)
            .zip(self.image_url)
            .zip(self.latitude.into_iter().zip(self.longitude));

        rows.filter_map(
            |(((((name, state), description), attractions), image_url), (lat, lon))| {
                let (name, state) = (name?, state?);
                let coordinates = match (
                    coerce_coordinate(lat.as_deref()),
                    coerce_coordinate(lon.as_deref()),
                ) {
                    (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
                    _ => None,
                };
                Some(Destination {
                    name,
                    state,
                    description: description.unwrap_or_default(),
                    popular_attractions: attractions.unwrap_or_default(),
                    image_url: image_url.unwrap_or_default(),
                    coordinates,
                })
            },
        )
        .collect()
    }
}

/// Values of one canonical column as trimmed text; blanks become `None`.
fn text_column(
    df: &DataFrame,
    headers: &[String],
    source: ColumnSource,
) -> Result<Vec<Option<String>>, PolarsError> {
    let position = match source {
        ColumnSource::Raw(position) => position,
        ColumnSource::Blank => return Ok(vec![None; df.height()]),
    };

    let series = df
        .column(&headers[position])?
        .as_materialized_series()
        .cast(&DataType::String)?;

    Ok(series
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect())
}

/// At least one cell in the frame holds a value; blank lines read as all-null rows.
fn has_data(df: &DataFrame) -> bool {
    df.height() > 0
        && df
            .get_columns()
            .iter()
            .any(|column| column.null_count() < column.len())
}

/// Coerce a raw coordinate cell; anything unparseable is absent.
pub fn coerce_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn strip_bom(bytes: Vec<u8>) -> Vec<u8> {
    match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    }
}
