use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use eyre::WrapErr;
use models::{CatalogItem, CatalogRoot};

use crate::trending::TrendingService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: Arc<RwLock<Vec<CatalogItem>>>,
    pub(crate) catalog_path: PathBuf,
    pub(crate) catalog_loaded: Arc<AtomicBool>,
    pub(crate) script_path: PathBuf,
    pub(crate) trending: Arc<TrendingService>,
}

impl AppState {
    pub(crate) fn new(
        catalog_path: PathBuf,
        script_path: PathBuf,
        trending: TrendingService,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Vec::new())),
            catalog_path,
            catalog_loaded: Arc::new(AtomicBool::new(false)),
            script_path,
            trending: Arc::new(trending),
        }
    }

    /// Replace the in-memory catalog with the file on disk.
    ///
    /// On error the previous catalog stays in place.
    pub(crate) fn reload_catalog(&self) -> eyre::Result<usize> {
        let (movies, loaded) = load_catalog(&self.catalog_path)?;
        let count = movies.len();

        {
            let mut catalog = self
                .catalog
                .write()
                .map_err(|_| eyre::eyre!("catalog lock poisoned"))?;
            *catalog = movies;
        }

        self.catalog_loaded.store(loaded, Ordering::Relaxed);

        Ok(count)
    }

    pub(crate) fn catalog_snapshot(&self) -> Vec<CatalogItem> {
        match self.catalog.read() {
            Ok(catalog) => catalog.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn is_catalog_loaded(&self) -> bool {
        self.catalog_loaded.load(Ordering::Relaxed)
    }
}

/// Movies from the catalog export at `path`, and whether the file existed.
pub(crate) fn load_catalog(path: &Path) -> eyre::Result<(Vec<CatalogItem>, bool)> {
    if !path.exists() {
        return Ok((Vec::new(), false));
    }

    let bytes = std::fs::read(path).wrap_err("read catalog")?;
    let root: CatalogRoot = serde_json::from_slice(&bytes).wrap_err("parse catalog")?;

    Ok((root.into_movies(), true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::config::BannerSettings;

    fn state_for(catalog_path: PathBuf) -> AppState {
        let trending = TrendingService::new(&BannerSettings::default(), tmdb_client::DEFAULT_BASE_URL);
        AppState::new(catalog_path, PathBuf::from("banner.js"), trending)
    }

    #[test]
    fn missing_catalog_is_empty_and_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path().join("catalog.json"));

        assert_eq!(state.reload_catalog().unwrap(), 0);
        assert!(!state.is_catalog_loaded());
        assert!(state.catalog_snapshot().is_empty());
    }

    #[test]
    fn reload_replaces_catalog_and_keeps_it_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"items": [
                {"id": "1", "name": "Dune", "production_year": 2021, "type": "Movie"},
                {"id": "2", "name": "Severance", "type": "Series"}
            ]}"#,
        )
        .unwrap();

        let state = state_for(path.clone());
        assert_eq!(state.reload_catalog().unwrap(), 1);
        assert!(state.is_catalog_loaded());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(state.reload_catalog().is_err());

        let snapshot = state.catalog_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Dune");
        assert!(state.is_catalog_loaded());
    }
}
