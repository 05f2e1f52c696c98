use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use organi::config::StorageConfig;
use organi::organization::{Organization, OrganizationStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

const DEMO_ORGANIZATION: &str = include_str!("../data/demo-organization.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn demo_organization() -> Result<Organization, StoreError> {
    Ok(serde_json::from_str(DEMO_ORGANIZATION)?)
}

/// Holds the whole document in process memory; lost on restart.
pub(crate) struct InMemoryOrganizationStore {
    document: Mutex<Organization>,
}

impl InMemoryOrganizationStore {
    pub(crate) fn new(organization: Organization) -> Self {
        Self {
            document: Mutex::new(organization),
        }
    }
}

impl OrganizationStore for InMemoryOrganizationStore {
    fn load(&self) -> Result<Organization, StoreError> {
        let guard = self
            .document
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        *guard = organization.clone();
        Ok(())
    }
}

/// Reads and writes the document as pretty-printed JSON on disk.
pub(crate) struct JsonFileOrganizationStore {
    path: PathBuf,
}

impl JsonFileOrganizationStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl OrganizationStore for JsonFileOrganizationStore {
    fn load(&self) -> Result<Organization, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(err),
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(organization)?;
        // the document is replaced only by a rename of a fully written sibling
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// Store selected from configuration: a JSON file when configured, otherwise the demo document.
pub(crate) enum ConfiguredStore {
    Memory(InMemoryOrganizationStore),
    File(JsonFileOrganizationStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        match &config.data_file {
            Some(path) => Ok(Self::File(JsonFileOrganizationStore::new(path))),
            None => Ok(Self::Memory(InMemoryOrganizationStore::new(
                demo_organization()?,
            ))),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory demo organization".to_string(),
            Self::File(store) => store.path().display().to_string(),
        }
    }
}

impl OrganizationStore for ConfiguredStore {
    fn load(&self) -> Result<Organization, StoreError> {
        match self {
            Self::Memory(store) => store.load(),
            Self::File(store) => store.load(),
        }
    }

    fn save(&self, organization: &Organization) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(organization),
            Self::File(store) => store.save(organization),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
