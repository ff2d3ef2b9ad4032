//! Session setup and initialization

use crate::config::Config;
use crate::provider::{DataProvider, InMemoryProvider};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

/// Session data shared by the dashboard and the one-shot commands
pub struct SessionData {
    pub config: Config,
    /// Data provider every view reads from
    pub provider: Arc<dyn DataProvider>,
    /// Human-readable name of the loaded dataset
    pub source: String,
}

/// Loads the dataset the session investigates.
///
/// `data_file` overrides the configured dataset; with neither set, the built-in
/// sample investigation is used.
///
/// # Errors
/// Fails when the dataset file cannot be read or is not valid JSON.
pub fn setup_session(
    config: Config,
    data_file: Option<PathBuf>,
) -> Result<SessionData, Box<dyn Error>> {
    let data_file = data_file.or_else(|| config.data_file.clone());
    let (provider, source) = match data_file {
        Some(path) => {
            let provider = InMemoryProvider::from_json_file(&path)
                .map_err(|e| format!("Failed to load dataset {}: {}", path.display(), e))?;
            (provider, format!("dataset {}", path.display()))
        }
        None => (InMemoryProvider::sample(), "sample dataset".to_string()),
    };
    info!("Session using {}", source);

    Ok(SessionData {
        config,
        provider: Arc::new(provider),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::sample_dataset;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_to_sample_dataset() {
        let session = setup_session(Config::default(), None).unwrap();
        assert_eq!(session.source, "sample dataset");
        assert_eq!(session.provider.summary().await.unwrap().total_records, 12);
    }

    #[tokio::test]
    async fn test_data_file_overrides_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("case.json");
        let mut dataset = sample_dataset();
        dataset.records.truncate(2);
        std::fs::write(&path, serde_json::to_vec(&dataset).unwrap()).unwrap();

        let config = Config {
            data_file: Some(dir.path().join("missing.json")),
            ..Config::default()
        };
        let session = setup_session(config, Some(path)).unwrap();
        assert_eq!(session.provider.summary().await.unwrap().total_records, 2);
    }

    #[test]
    fn test_missing_data_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = setup_session(Config::default(), Some(dir.path().join("absent.json")));
        assert!(result.is_err());
    }
}
