use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::Templates;

/// Directory searched for record templates when nothing else is configured.
pub const DEFAULT_TEMPLATES_DIR: &str = "views";

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "digicase.json";

fn default_templates_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

fn default_config_version() -> String {
    "0.1.0".to_string()
}

/// User-editable settings for a digicase installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Settings format version. This is about the settings file, not case files.
    #[serde(default = "default_config_version")]
    pub config_version: String,
    /// Directory holding `event_record.html` and `evidence_record.html`.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    /// Directory new case files are placed in when given a bare file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_case_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            templates_dir: default_templates_dir(),
            default_case_dir: None,
        }
    }
}

impl Settings {
    /// Load settings JSON from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings at {}", path.display()))?;
        let settings: Settings =
            serde_json::from_str(&body).context("Failed to parse settings JSON")?;
        Ok(settings)
    }

    /// Load settings from `path` if given, else from [`DEFAULT_SETTINGS_FILE`]
    /// when it exists, else fall back to defaults.
    ///
    /// An explicitly named file must exist; a malformed file is always an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let implicit = Path::new(DEFAULT_SETTINGS_FILE);
                if implicit.is_file() {
                    Self::load(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Templates rooted at the configured directory.
    pub fn templates(&self) -> Templates {
        Templates::new(&self.templates_dir)
    }

    /// Place a bare case file name under `default_case_dir`, if configured.
    ///
    /// Paths with a directory component are returned unchanged.
    pub fn resolve_case_path(&self, path: &Path) -> PathBuf {
        let is_bare = path.parent().map(|p| p.as_os_str().is_empty()).unwrap_or(true);
        match (&self.default_case_dir, is_bare) {
            (Some(dir), true) => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
