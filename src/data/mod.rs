//! Data module - CSV loading, header normalization and caching

mod cache;
mod loader;
mod record;
mod schema;

pub use cache::DatasetCache;
pub use record::{Catalog, Destination, GeoPoint};
