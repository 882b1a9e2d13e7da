//! Catalog loading with bundled fallback.
//!
//! The catalog may be refreshed out of band as a pre-curated JSON
//! document. Loading never fetches anything: an explicit local file is
//! read if configured, and any failure falls back to the compiled-in
//! catalog with a warning.

use std::path::Path;

use tracing::{info, warn};

use crate::domain::{Catalog, InfraError};
use crate::infrastructure::links::RefLinks;

/// Read a catalog snapshot from a local JSON document.
pub fn load_from_file(path: &Path) -> Result<Catalog, InfraError> {
    let raw = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&raw)?;
    Ok(catalog)
}

/// Load the configured catalog file, or the compiled-in catalog when no
/// file is configured or the file cannot be used.
pub fn load_or_builtin(path: Option<&Path>, links: &RefLinks) -> Catalog {
    let Some(path) = path else {
        return super::builtin(links);
    };

    match load_from_file(path) {
        Ok(catalog) => {
            info!(
                path = %path.display(),
                banks = catalog.banks.len(),
                updated_at = %catalog.updated_at,
                "catalog loaded"
            );
            catalog
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "catalog file unusable, using bundled catalog"
            );
            super::builtin(links)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rko-calc-{}-{name}", std::process::id()))
    }

    #[test]
    fn catalog_json_round_trips_through_a_file() {
        let catalog = super::super::builtin(&RefLinks::default());
        let path = temp_path("roundtrip.json");
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, catalog);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file(Path::new("/nonexistent/banks.json")).is_err());
    }

    #[test]
    fn fallback_to_builtin_on_bad_file() {
        let links = RefLinks::default();
        let path = temp_path("garbage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let catalog = load_or_builtin(Some(&path), &links);
        assert_eq!(catalog, super::super::builtin(&links));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn no_path_means_builtin() {
        let links = RefLinks::default();
        assert_eq!(
            load_or_builtin(None, &links),
            super::super::builtin(&links)
        );
    }
}
