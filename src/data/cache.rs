//! Dataset Cache
//! Memoizes canonical tables per source file, keyed by path and file signature.

use super::loader::{DataLoader, DatasetError, LoadCause};
use super::record::Catalog;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identifies one version of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSignature {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceSignature {
    fn of(path: &Path) -> Result<Self, DatasetError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DatasetError::SourceNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => return Err(LoadCause::Io(err).into()),
        };
        Ok(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

struct CacheEntry {
    signature: SourceSignature,
    catalog: Arc<Catalog>,
}

/// Loaded canonical tables for the current session.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
    reads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical table for `path`, reading it only when the file is
    /// new to the cache or its signature changed.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Catalog>, DatasetError> {
        let signature = SourceSignature::of(path)?;
        let key = cache_key(path);

        if let Some(entry) = self.entries.get(&key) {
            if entry.signature == signature {
                debug!(path = %key.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.catalog));
            }
            debug!(path = %key.display(), "source changed, reloading");
        } else {
            debug!(path = %key.display(), "dataset cache miss");
        }

        self.reads += 1;
        let catalog = match DataLoader::load_catalog(path) {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                self.invalidate(path);
                return Err(err);
            }
        };

        self.entries.insert(
            key,
            CacheEntry {
                signature,
                catalog: Arc::clone(&catalog),
            },
        );
        Ok(catalog)
    }

    /// Forget the cached table for `path`, so the next `load` reads it again.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(&cache_key(path)).is_some();
        if removed {
            debug!(path = %path.display(), "dataset cache entry dropped");
        }
        removed
    }

    /// Number of times a source was actually read and parsed.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of sources currently held.
    pub fn cached_sources(&self) -> usize {
        self.entries.len()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "name,state,lat,lon\nTaj Mahal,Uttar Pradesh,27.17,78.04\n";

    fn write(path: &Path, contents: &str) {
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn repeated_loads_hit_the_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);

        let mut cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert_eq!(cache.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.cached_sources(), 1);
    }

    #[test]
    fn relative_and_absolute_paths_share_an_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);
        let dotted = dir.path().join(".").join("destinations.csv");

        let mut cache = DatasetCache::new();
        cache.load(&path).unwrap();
        cache.load(&dotted).unwrap();
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn changed_source_is_reread() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);

        let mut cache = DatasetCache::new();
        assert_eq!(cache.load(&path).unwrap().len(), 1);

        write(
            &path,
            "name,state,lat,lon\nTaj Mahal,Uttar Pradesh,27.17,78.04\nHampi,Karnataka,15.33,76.46\n",
        );
        assert_eq!(cache.load(&path).unwrap().len(), 2);
        assert_eq!(cache.reads(), 2);
    }

    #[test]
    fn invalidate_forces_a_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);

        let mut cache = DatasetCache::new();
        cache.load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        cache.load(&path).unwrap();
        assert_eq!(cache.reads(), 2);
    }

    #[test]
    fn distinct_sources_are_cached_separately() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write(&a, SAMPLE);
        write(&b, "place,region\nMunnar,Kerala\nOoty,Tamil Nadu\n");

        let mut cache = DatasetCache::new();
        assert_eq!(cache.load(&a).unwrap().len(), 1);
        assert_eq!(cache.load(&b).unwrap().len(), 2);
        cache.load(&a).unwrap();
        assert_eq!(cache.reads(), 2);
        assert_eq!(cache.cached_sources(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");

        let mut cache = DatasetCache::new();
        assert!(matches!(
            cache.load(&path),
            Err(DatasetError::SourceNotFound { .. })
        ));

        write(&path, "title\nHampi\n");
        assert!(matches!(
            cache.load(&path),
            Err(DatasetError::MissingRequiredColumns { .. })
        ));
        assert_eq!(cache.cached_sources(), 0);

        write(&path, SAMPLE);
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }

    #[test]
    fn stale_entry_is_dropped_when_source_turns_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);

        let mut cache = DatasetCache::new();
        cache.load(&path).unwrap();
        assert_eq!(cache.cached_sources(), 1);

        write(&path, "name,state\n\n\n");
        assert!(matches!(
            cache.load(&path),
            Err(DatasetError::EmptyOrInvalidSource { .. })
        ));
        assert_eq!(cache.cached_sources(), 0);
        assert!(!cache.invalidate(&path));
    }

    #[test]
    fn reload_after_invalidate_reads_unchanged_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("destinations.csv");
        write(&path, SAMPLE);

        let mut cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        cache.invalidate(&path);
        let second = cache.load(&path).unwrap();

        assert_eq!(cache.reads(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.destinations(), second.destinations());
    }
}
