//! Local tier: the fallback dataset.
//!
//! The original site shipped the full dataset as a lazily injected script;
//! here the capability is a trait so the hosting application can back it with
//! a bundled file, an embedded resource, or anything else keyed by canonical
//! date strings.

use crate::{RawCalendarRecord, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// One-time, possibly slow load of the complete fallback dataset.
///
/// The client guarantees a single in-flight `load()` no matter how many
/// lookups race past the remote tier; implementations do not need their own
/// deduplication.
#[async_trait]
pub trait LocalDatasetProvider: Send + Sync {
    async fn load(&self) -> Result<HashMap<String, RawCalendarRecord>>;
}

/// Dataset read from a JSON file mapping canonical keys to raw records:
/// `{"2024-01-01": {"solarYear": 2024, ...}, ...}`.
pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocalDatasetProvider for JsonFileDataset {
    async fn load(&self) -> Result<HashMap<String, RawCalendarRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let dataset = serde_json::from_slice(&bytes)?;
        Ok(dataset)
    }
}

/// Dataset held in memory at construction time. Useful for small bundled
/// tables and for tests.
pub struct StaticDataset {
    records: HashMap<String, RawCalendarRecord>,
}

impl StaticDataset {
    pub fn new(records: HashMap<String, RawCalendarRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

#[async_trait]
impl LocalDatasetProvider for StaticDataset {
    async fn load(&self) -> Result<HashMap<String, RawCalendarRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{"2024-01-01": {
        "solarYear": 2024, "solarMonth": 1, "solarDay": 1,
        "lunarYear": 2023, "lunarMonth": 11, "lunarDay": 20,
        "yearGanji": "갑진", "dayGanji": "갑자",
        "weekDay": "월", "zodiac": "용"
    }}"#;

    #[tokio::test]
    async fn json_file_dataset_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "manseryeok-dataset-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, FIXTURE).unwrap();

        let dataset = JsonFileDataset::new(&path).load().await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset["2024-01-01"].solar_year, 2024);
        assert_eq!(dataset["2024-01-01"].year_ganji, "갑진");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let provider = JsonFileDataset::new("/nonexistent/manseryeok.json");
        assert!(provider.load().await.is_err());
    }
}
